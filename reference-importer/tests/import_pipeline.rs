use crossref_client::CrossrefClient;
use reference_importer::editor::{FileSelection, SelectionSource};
use reference_importer::models::ImporterSettings;
use reference_importer::notes::VaultStore;
use reference_importer::notice::{Notice, Notifier};
use reference_importer::{ImportOutcome, ReferenceImporter};
use serde_json::json;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

fn deep_learning() -> serde_json::Value {
    json!({
        "status": "ok",
        "message-type": "work",
        "message": {
            "title": ["Deep learning"],
            "author": [
                {"given": "Yann", "family": "LeCun", "sequence": "first"},
                {"given": "Yoshua", "family": "Bengio", "sequence": "additional"},
                {"given": "Geoffrey", "family": "Hinton", "sequence": "additional"}
            ],
            "created": {"date-parts": [[2015, 5, 27]], "timestamp": 1432742400000u64},
            "container-title": ["Nature"],
            "volume": "521",
            "issue": "7553",
            "page": "436-444",
            "DOI": "10.1038/nature14539",
            "URL": "http://dx.doi.org/10.1038/nature14539",
            "publisher": "Springer Science and Business Media LLC"
        }
    })
}

#[tokio::test]
async fn test_import_writes_note_and_rewrites_draft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/10.1038/nature14539"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deep_learning()))
        .mount(&server)
        .await;

    let vault = tempdir().unwrap();
    let draft = vault.path().join("draft.md");
    fs::write(&draft, "Convolutional nets (10.1038/nature14539) changed vision.\n").unwrap();

    let settings = ImporterSettings::default();
    let client = CrossrefClient::new(&server.uri());
    let store = VaultStore::new(vault.path().to_path_buf());
    let notifier = RecordingNotifier::default();
    let importer = ReferenceImporter::new(&settings, &client, &store, &notifier);

    let mut selection = FileSelection::open(&draft, "10.1038/nature14539").unwrap();
    let outcome = importer.import(&mut selection).await;

    match &outcome {
        ImportOutcome::Created {
            path,
            link,
            aliases_saved,
        } => {
            assert_eq!(path, "/references/Deep learning.md");
            assert_eq!(link, "[[Deep learning|10.1038/nature14539]]");
            assert!(aliases_saved);
        }
        other => panic!("expected Created, got {:?}", other),
    }
    assert!(notifier.notices.lock().unwrap().is_empty());

    let note = fs::read_to_string(vault.path().join("references/Deep learning.md")).unwrap();
    assert!(note.starts_with("---\n"));
    assert!(note.contains("aliases:\n  - \"lecun2015\"\n  - \"10.1038/nature14539\"\n"));
    assert!(note.contains("# Deep learning\n"));
    assert!(note.contains("- Author: Yann LeCun, Yoshua Bengio, Geoffrey Hinton\n"));
    assert!(note.contains("- Journal: Nature\n"));
    assert!(note.contains("- Pages: 436-444\n"));
    assert!(note.ends_with("## Summary\n\nTK\n"));

    assert_eq!(
        fs::read_to_string(&draft).unwrap(),
        "Convolutional nets ([[Deep learning|10.1038/nature14539]]) changed vision.\n"
    );

    let refs = store.list_references(&settings.reference_note_path).unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].title, "Deep learning");
    assert_eq!(refs[0].year, Some(2015));
    assert_eq!(refs[0].doi.as_deref(), Some("10.1038/nature14539"));
    assert_eq!(refs[0].aliases, vec!["lecun2015", "10.1038/nature14539"]);
}

#[tokio::test]
async fn test_second_import_reports_existing_note() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/10.1038/nature14539"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deep_learning()))
        .expect(2)
        .mount(&server)
        .await;

    let vault = tempdir().unwrap();
    let first_draft = vault.path().join("first.md");
    let second_draft = vault.path().join("second.md");
    fs::write(&first_draft, "10.1038/nature14539\n").unwrap();
    fs::write(&second_draft, "again: 10.1038/nature14539\n").unwrap();

    let settings = ImporterSettings::default();
    let client = CrossrefClient::new(&server.uri());
    let store = VaultStore::new(vault.path().to_path_buf());
    let notifier = RecordingNotifier::default();
    let importer = ReferenceImporter::new(&settings, &client, &store, &notifier);

    let mut first = FileSelection::open(&first_draft, "10.1038/nature14539").unwrap();
    assert!(matches!(
        importer.import(&mut first).await,
        ImportOutcome::Created { .. }
    ));
    let note_path = vault.path().join("references/Deep learning.md");
    let written = fs::read_to_string(&note_path).unwrap();

    let mut second = FileSelection::open(&second_draft, "10.1038/nature14539").unwrap();
    let outcome = importer.import(&mut second).await;

    assert!(matches!(outcome, ImportOutcome::AlreadyExists { .. }));
    assert!(outcome.is_success());
    assert_eq!(
        *notifier.notices.lock().unwrap(),
        vec![Notice::AlreadyExists {
            path: "/references/Deep learning.md".to_string()
        }]
    );
    assert_eq!(fs::read_to_string(&note_path).unwrap(), written);
    assert_eq!(second.selection(), "10.1038/nature14539");
    assert_eq!(
        fs::read_to_string(&second_draft).unwrap(),
        "again: 10.1038/nature14539\n"
    );
}

#[tokio::test]
async fn test_not_found_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/10.0000/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Resource not found."))
        .mount(&server)
        .await;

    let vault = tempdir().unwrap();
    let draft = vault.path().join("draft.md");
    fs::write(&draft, "cite 10.0000/missing here\n").unwrap();

    let settings = ImporterSettings::default();
    let client = CrossrefClient::new(&server.uri());
    let store = VaultStore::new(vault.path().to_path_buf());
    let notifier = RecordingNotifier::default();
    let importer = ReferenceImporter::new(&settings, &client, &store, &notifier);

    let mut selection = FileSelection::open(&draft, "10.0000/missing").unwrap();
    let outcome = importer.import(&mut selection).await;

    match outcome {
        ImportOutcome::Failed(e) => assert!(e.is_fetch_failure()),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(*notifier.notices.lock().unwrap(), vec![Notice::FetchFailed]);
    assert!(!vault.path().join("references").exists());
    assert_eq!(
        fs::read_to_string(&draft).unwrap(),
        "cite 10.0000/missing here\n"
    );
}

//! Parse and generate YAML frontmatter for notes.
//!
//! Hand-rolled YAML (no serde_yaml). Only `aliases` and `tags` are understood;
//! every other key is carried through untouched so editing aliases never
//! loses data a user or another plugin put there.

/// Parsed note frontmatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
    /// Lines belonging to keys we don't interpret, in original order
    other: Vec<String>,
}

impl FrontMatter {
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.tags.is_empty() && self.other.is_empty()
    }

    /// Replace the alias list
    pub fn set_aliases(&mut self, aliases: Vec<String>) {
        self.aliases = aliases;
    }
}

/// Split content into (frontmatter_yaml, body). Returns empty frontmatter if none found.
pub fn split_frontmatter(content: &str) -> (String, String) {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return (String::new(), content.to_string());
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    if let Some(close_idx) = after_open.find("\n---") {
        let yaml = after_open[..close_idx].trim().to_string();
        let body_start = close_idx + 4; // skip \n---
        let body = if body_start < after_open.len() {
            after_open[body_start..].trim_start_matches('\n').to_string()
        } else {
            String::new()
        };
        (yaml, body)
    } else {
        (String::new(), content.to_string())
    }
}

/// Which list key the block-style `- item` lines currently belong to
enum ListTarget {
    Aliases,
    Tags,
    Other,
}

/// Parse YAML frontmatter string into FrontMatter (hand-rolled, no serde_yaml)
pub fn parse_frontmatter(yaml: &str) -> FrontMatter {
    let mut fm = FrontMatter::default();
    let mut target = ListTarget::Other;

    for line in yaml.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Continuation of a block list (`  - item`) or nested value
        if line.starts_with(' ') || line.starts_with('\t') || trimmed.starts_with("- ") {
            let item = trimmed.strip_prefix('-').map(str::trim);
            match (&target, item) {
                (ListTarget::Aliases, Some(item)) => push_item(&mut fm.aliases, item),
                (ListTarget::Tags, Some(item)) => push_item(&mut fm.tags, item),
                _ => fm.other.push(line.to_string()),
            }
            continue;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let value = value.trim();
            match key.trim() {
                "aliases" | "alias" => {
                    target = ListTarget::Aliases;
                    fm.aliases.extend(parse_value_list(value));
                    continue;
                }
                "tags" | "tag" => {
                    target = ListTarget::Tags;
                    fm.tags.extend(parse_value_list(value));
                    continue;
                }
                _ => {}
            }
        }

        target = ListTarget::Other;
        fm.other.push(line.to_string());
    }

    fm
}

/// Render a FrontMatter block including the `---` fences
pub fn render_frontmatter(fm: &FrontMatter) -> String {
    let mut lines = Vec::new();
    lines.push("---".to_string());
    lines.extend(fm.other.iter().cloned());

    if !fm.tags.is_empty() {
        let tags_str: Vec<String> = fm.tags.iter().map(|t| t.to_string()).collect();
        lines.push(format!("tags: [{}]", tags_str.join(", ")));
    }

    if !fm.aliases.is_empty() {
        lines.push("aliases:".to_string());
        for alias in &fm.aliases {
            lines.push(format!("  - {}", quote(alias)));
        }
    }

    lines.push("---".to_string());
    lines.join("\n")
}

/// Apply `edit` to the frontmatter of `content`, creating a block if there is none
pub fn update_frontmatter(content: &str, edit: impl FnOnce(&mut FrontMatter)) -> String {
    let (yaml, body) = split_frontmatter(content);
    let mut fm = parse_frontmatter(&yaml);
    edit(&mut fm);

    if fm.is_empty() {
        return body;
    }
    format!("{}\n{}", render_frontmatter(&fm), body)
}

fn push_item(list: &mut Vec<String>, item: &str) {
    let item = unquote(item);
    if !item.is_empty() {
        list.push(item);
    }
}

/// Inline `[a, b]`, a single scalar, or nothing (block list follows)
fn parse_value_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else if value.starts_with('[') {
        parse_inline_list(value)
    } else {
        vec![unquote(value)]
    }
}

/// Double-quote a scalar, escaping backslashes and quotes
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Remove surrounding quotes from a string
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].replace("\\\"", "\"").replace("\\\\", "\\")
    } else if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        s[1..s.len() - 1].replace("''", "'")
    } else {
        s.to_string()
    }
}

/// Parse an inline YAML list like [foo, bar, "baz qux"]
fn parse_inline_list(s: &str) -> Vec<String> {
    let s = s.trim();
    let inner = if s.starts_with('[') && s.ends_with(']') {
        &s[1..s.len() - 1]
    } else {
        s
    };

    inner
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

//! Front-matter splitting and parsing.
//!
//! An article starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-03-01
//! tags: [rust, web]
//! ---
//! # Body in Markdown
//! ```
//!
//! A document that does not open with a fence has no metadata and the whole
//! text is the body. An opened but unterminated fence, invalid YAML, or YAML
//! that is not a mapping are errors; the builder treats them as fatal.

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter is opened with '---' but never closed")]
    Unterminated,
    #[error("front matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("front matter key '{0}' must be a plain value")]
    NotAScalar(&'static str),
}

/// Metadata keys recognized in front matter. Absent keys stay `None`;
/// defaults are applied by the article builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub slug: Option<String>,
}

/// A document split into metadata and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Raw YAML shape. Values stay untyped so `date: 2024-01-01` and
/// `title: 1984` are read as text rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<Value>,
    description: Option<Value>,
    date: Option<Value>,
    author: Option<Value>,
    tags: Option<Value>,
    image: Option<Value>,
    slug: Option<Value>,
}

/// Split `content` into front matter and body.
pub fn parse(content: &str) -> Result<Document, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some((yaml, body)) = split(content)? else {
        return Ok(Document {
            front_matter: FrontMatter::default(),
            body: content.to_string(),
        });
    };

    let value: Value = serde_yaml::from_str(yaml)?;
    let raw: RawFrontMatter = match value {
        Value::Null => RawFrontMatter::default(),
        Value::Mapping(_) => serde_yaml::from_value(value)?,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    Ok(Document {
        front_matter: FrontMatter {
            title: scalar("title", raw.title)?,
            description: scalar("description", raw.description)?,
            date: scalar("date", raw.date)?,
            author: scalar("author", raw.author)?,
            tags: tags(raw.tags)?,
            image: scalar("image", raw.image)?.filter(|s| !s.is_empty()),
            slug: scalar("slug", raw.slug)?.filter(|s| !s.is_empty()),
        },
        body: body.to_string(),
    })
}

/// Locate the fenced block. Returns `(yaml, body)` or `None` when the
/// document has no front matter.
fn split(content: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_fence(first, "---") => {}
        _ => return Ok(None),
    }

    let yaml_start = content
        .find('\n')
        .map(|i| i + 1)
        .unwrap_or(content.len());
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line, "---") || is_fence(line, "...") {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

fn is_fence(line: &str, fence: &str) -> bool {
    line.trim_end_matches(['\r', '\n']).trim_end() == fence
}

fn scalar(key: &'static str, value: Option<Value>) -> Result<Option<String>, FrontMatterError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(FrontMatterError::NotAScalar(key)),
    }
}

/// Tags may be a YAML list or a single comma-separated string.
fn tags(value: Option<Value>) -> Result<Vec<String>, FrontMatterError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                if let Some(tag) = scalar("tags", Some(item))? {
                    tags.push(tag);
                }
            }
            Ok(tags)
        }
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()),
        Some(_) => Err(FrontMatterError::NotAScalar("tags")),
    }
}

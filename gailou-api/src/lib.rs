use std::{fmt, str::FromStr, sync::Arc};

mod error;
pub use error::Error;

pub mod json;

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// Extract an article id from user input.
    ///
    /// Accepts either a bare numeric id or any link containing a
    /// `question/<digits>` path segment, eg. `https://www.jisilu.cn/question/517247`.
    /// Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<ArticleId, Error> {
        let input = raw.trim();
        if is_numeric(input) {
            return Ok(ArticleId(String::from(input)));
        }
        for (idx, pat) in input.match_indices("question/") {
            let rest = &input[idx + pat.len()..];
            let len = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if len > 0 {
                return Ok(ArticleId(String::from(&rest[..len])));
            }
        }
        Err(Error::InvalidArticleId(String::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for ArticleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<ArticleId, Error> {
        ArticleId::parse(s)
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,

    #[serde(default)]
    pub author_avatar: Option<String>,

    /// Set when the comment starts with an `@user` mention
    #[serde(default)]
    pub reply_to_user: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    pub time: String,

    /// Pre-rendered markup, displayed as-is
    pub content: String,

    /// Replies, in display order
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Comment {
    /// Avatar to display, if the author has a custom one.
    ///
    /// The forum serves a placeholder image for users without an avatar,
    /// those are reported as `None` too.
    pub fn avatar(&self) -> Option<&str> {
        self.author_avatar
            .as_deref()
            .filter(|a| !a.is_empty() && !a.contains("default"))
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }

    pub fn reply_to_user(&self) -> Option<&str> {
        self.reply_to_user.as_deref().filter(|u| !u.is_empty())
    }
}

impl Drop for Comment {
    // Reply chains come from an untrusted server, so avoid recursing once per
    // nesting level when freeing them.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut c) = pending.pop() {
            pending.append(&mut c.children);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub publish_time: Option<String>,

    /// Pre-rendered markup, displayed as-is
    pub content: String,

    /// Top-level comments, in display order
    pub comments: Arc<Vec<Comment>>,
}

impl Article {
    pub fn top_level_count(&self) -> usize {
        self.comments.len()
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HistoryEntry {
    pub id: ArticleId,
    pub title: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ParseQuery {
    pub article_id: ArticleId,

    #[serde(default)]
    pub force_update: bool,
}

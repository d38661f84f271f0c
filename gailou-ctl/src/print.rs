use std::io::{self, Write};

use gailou_client::{
    api::{Article, Comment, HistoryEntry},
    CommentTree, Row,
};

// Past this depth replies are not indented any further
const MAX_INDENT: usize = 16;

pub fn article(out: &mut impl Write, article: &Article, tree: &CommentTree) -> io::Result<()> {
    writeln!(out, "{}", article.title)?;
    let byline = [article.author.as_deref(), article.publish_time.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if !byline.is_empty() {
        writeln!(out, "{}", byline.join("  "))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", article.content)?;
    writeln!(out)?;
    writeln!(out, "Comments ({} top-level)", article.top_level_count())?;
    writeln!(out)?;
    for row in tree.render() {
        match row {
            Row::NoComments => writeln!(out, "No comments yet")?,
            Row::Comment(row) => {
                let indent = "    ".repeat(row.depth.min(MAX_INDENT));
                writeln!(out, "{indent}{}", header(row.comment, row.depth))?;
                writeln!(out, "{indent}  {}", row.comment.content)?;
                if let Some(toggle) = row.toggle {
                    writeln!(out, "{indent}  [{toggle}]")?;
                }
            }
        }
    }
    Ok(())
}

fn header(c: &Comment, depth: usize) -> String {
    let mut res = String::new();
    if depth > MAX_INDENT {
        res.push_str(&format!("({depth}) "));
    }
    res.push_str(&c.author);
    if let Some(to) = c.reply_to_user() {
        res.push_str(&format!(" -> @{to}"));
    }
    if let Some(loc) = c.location() {
        res.push_str(&format!(" · {loc}"));
    }
    res.push_str(&format!(" · {} #{}", c.time, c.id));
    res
}

pub fn history(out: &mut impl Write, history: &[HistoryEntry]) -> io::Result<()> {
    if history.is_empty() {
        writeln!(out, "No article fetched yet")?;
    }
    for e in history {
        writeln!(out, "{:>10}  {}", e.id, e.title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gailou_client::api::{ArticleId, CommentId};

    use super::*;

    fn c(id: &str, reply_to: Option<&str>, children: Vec<Comment>) -> Comment {
        Comment {
            id: CommentId(String::from(id)),
            author: format!("u{id}"),
            author_avatar: None,
            reply_to_user: reply_to.map(String::from),
            location: Some(String::new()),
            time: String::from("2026-02-21 16:51"),
            content: format!("c{id}"),
            children,
        }
    }

    fn render(a: &Article, tree: &CommentTree) -> String {
        let mut out = Vec::new();
        article(&mut out, a, tree).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_nested_threads() {
        let a = Article {
            id: ArticleId(String::from("1")),
            title: String::from("Title"),
            author: Some(String::from("楼主")),
            publish_time: None,
            content: String::from("<p>body</p>"),
            comments: Arc::new(vec![c("1", None, vec![c("2", Some("u1"), vec![])])]),
        };
        let mut tree = CommentTree::new(a.comments.clone());
        assert_eq!(
            render(&a, &tree),
            "Title\n楼主\n\n<p>body</p>\n\nComments (1 top-level)\n\n\
             u1 · 2026-02-21 16:51 #1\n  c1\n  [Collapse replies]\n\
             \x20   u2 -> @u1 · 2026-02-21 16:51 #2\n      c2\n"
        );

        tree.toggle(&CommentId(String::from("1")));
        assert!(render(&a, &tree).ends_with("u1 · 2026-02-21 16:51 #1\n  c1\n  [Expand 1 reply]\n"));
    }

    #[test]
    fn prints_placeholder_without_comments() {
        let a = Article {
            id: ArticleId(String::from("1")),
            title: String::from("Title"),
            author: None,
            publish_time: None,
            content: String::new(),
            comments: Arc::new(Vec::new()),
        };
        let tree = CommentTree::new(a.comments.clone());
        assert!(render(&a, &tree).ends_with("Comments (0 top-level)\n\nNo comments yet\n"));
    }

    #[test]
    fn prints_history() {
        let mut out = Vec::new();
        history(
            &mut out,
            &[HistoryEntry {
                id: ArticleId(String::from("517247")),
                title: String::from("盖楼"),
            }],
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    517247  盖楼\n");
    }
}

use std::{io::Write, sync::Arc};

use anyhow::Context;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use gailou_api::{json, Article, ArticleId, Comment, CommentId};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const NUM_USERS: usize = 12;
const TITLE_LEN: usize = 8;

const ARTICLE_PARAGRAPH_COUNT: usize = 4;
const ARTICLE_PARAGRAPH_LEN: usize = 60;
const COMMENT_WORD_COUNT: usize = 25;

const NUM_TOP_LEVEL: usize = 15;
const MAX_REPLIES: usize = 4;
const MAX_DEPTH: usize = 6;

const LOCATIONS: &[&str] = &["北京", "上海", "广东", "四川", ""];

#[derive(structopt::StructOpt)]
struct Opt {
    /// Article id of the generated fixture
    #[structopt(long, default_value = "517247")]
    id: String,

    /// Seed for reproducible output
    #[structopt(long)]
    seed: Option<u64>,

    /// Append one reply chain this deep to the first thread
    #[structopt(long, default_value = "0")]
    deep_chain: usize,
}

struct Gen {
    rng: StdRng,
    users: Vec<String>,
    next_id: u64,
    time: NaiveDateTime,
}

impl Gen {
    fn user(&mut self) -> String {
        self.users[self.rng.gen_range(0..self.users.len())].clone()
    }

    fn comment(&mut self, reply_to: Option<String>) -> Comment {
        self.next_id += 1;
        self.time += Duration::minutes(self.rng.gen_range(1..180));
        let avatar = match self.rng.gen_range(0..3) {
            0 => None,
            1 => Some(String::from("https://example.org/avatar/default.png")),
            _ => Some(format!("https://example.org/avatar/{}.png", self.next_id)),
        };
        Comment {
            id: CommentId(self.next_id.to_string()),
            author: self.user(),
            author_avatar: avatar,
            reply_to_user: reply_to,
            location: LOCATIONS.choose(&mut self.rng).map(|l| String::from(*l)),
            time: self.time.format("%Y-%m-%d %H:%M").to_string(),
            content: format!("<p>{}</p>", lipsum::lipsum_words(COMMENT_WORD_COUNT)),
            children: Vec::new(),
        }
    }

    fn thread(&mut self, depth: usize, reply_to: Option<String>) -> Comment {
        let mut c = self.comment(reply_to);
        if depth < MAX_DEPTH {
            let replies = self.rng.gen_range(0..=MAX_REPLIES.saturating_sub(depth));
            for _ in 0..replies {
                let reply = self.thread(depth + 1, Some(c.author.clone()));
                c.children.push(reply);
            }
        }
        c
    }

    fn chain(&mut self, len: usize) -> Option<Comment> {
        let mut links = Vec::with_capacity(len);
        let mut author = None;
        for _ in 0..len {
            let c = self.comment(author.take());
            author = Some(c.author.clone());
            links.push(c);
        }
        let mut res = links.pop()?;
        while let Some(mut parent) = links.pop() {
            parent.children.push(res);
            res = parent;
        }
        Some(res)
    }
}

fn generate(opt: &Opt) -> Article {
    let rng = match opt.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let start = NaiveDate::from_ymd_opt(2026, 2, 21)
        .and_then(|d| d.and_hms_opt(16, 51, 0))
        .expect("fixed start date is valid");
    let mut gen = Gen {
        rng,
        users: (0..NUM_USERS).map(|i| format!("网友{i:02}")).collect(),
        next_id: 0,
        time: start,
    };

    let author = gen.user();
    let mut comments = (0..NUM_TOP_LEVEL)
        .map(|_| gen.thread(0, None))
        .collect::<Vec<_>>();
    if let (Some(first), Some(chain)) = (comments.first_mut(), gen.chain(opt.deep_chain)) {
        first.children.push(chain);
    }
    let content = (0..ARTICLE_PARAGRAPH_COUNT)
        .map(|_| format!("<p>{}</p>", lipsum::lipsum_words(ARTICLE_PARAGRAPH_LEN)))
        .collect::<String>();

    Article {
        id: ArticleId(opt.id.clone()),
        title: lipsum::lipsum_words(TITLE_LEN),
        author: Some(author),
        publish_time: Some(start.format("%Y-%m-%d %H:%M").to_string()),
        content,
        comments: Arc::new(comments),
    }
}

fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();
    let article = generate(&opt);
    let mut out = json::to_vec_pretty(&article).context("serializing generated article")?;
    out.push(b'\n');
    std::io::stdout()
        .lock()
        .write_all(&out)
        .context("writing generated article")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Follows the extra chain hanging off the first top-level comment
    fn chain_len(a: &Article) -> usize {
        let mut len = 0;
        let mut cur = a.comments[0].children.last();
        while let Some(c) = cur {
            len += 1;
            cur = c.children.first();
        }
        len
    }

    #[test]
    fn deep_chain_fixture_loads_back() {
        let opt = Opt {
            id: String::from("517247"),
            seed: Some(42),
            deep_chain: 5_000,
        };
        let article = generate(&opt);
        assert_eq!(chain_len(&article), 5_000);

        let text = json::to_vec_pretty(&article).unwrap();
        let back: Article = json::from_slice(&text).unwrap();
        assert_eq!(back.id, article.id);
        assert_eq!(back.title, article.title);
        assert_eq!(chain_len(&back), 5_000);
        assert_eq!(json::to_vec_pretty(&back).unwrap(), text);
    }

    #[test]
    fn same_seed_same_threads() {
        let opt = Opt {
            id: String::from("1"),
            seed: Some(7),
            deep_chain: 0,
        };
        let (a, b) = (generate(&opt), generate(&opt));
        assert_eq!(a.comments.len(), NUM_TOP_LEVEL);
        let ids = |a: &Article| a.comments.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}

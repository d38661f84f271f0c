use std::sync::Arc;

use futures::future::join;
use gailou_client::{
    api::{self, Article, ArticleId, Comment, CommentId},
    ArticleSession, CommentTree, DataService, Error, Row, Status,
};
use gailou_mock_server::{MockServer, MockService};

fn comment(id: &str, children: Vec<Comment>) -> Comment {
    Comment {
        id: CommentId(String::from(id)),
        author: format!("user{id}"),
        author_avatar: Some(String::new()),
        reply_to_user: None,
        location: Some(String::from("上海")),
        time: String::from("2026-02-21 16:51"),
        content: format!("<div class=\"markitup-box\">comment {id}</div>"),
        children,
    }
}

fn article(id: &str, title: &str) -> Article {
    Article {
        id: ArticleId(String::from(id)),
        title: String::from(title),
        author: Some(String::from("楼主")),
        publish_time: Some(String::from("2026-01-08 09:30")),
        content: String::from("<div class=\"aw-question-detail-txt\">body</div>"),
        comments: Arc::new(vec![comment("1", vec![comment("2", vec![])])]),
    }
}

fn service() -> MockService {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }
    let mut server = MockServer::new();
    server.publish(article("517247", "盖楼"));
    server.publish(article("42", "other"));
    MockService::new(server)
}

async fn load(session: &mut ArticleSession, svc: &MockService, id: &str, force: bool) {
    let t = session.load_article(ArticleId(String::from(id)), force);
    if let Some(h) = session.complete_load(t.fetch(svc).await) {
        session.complete_history(h.fetch(svc).await);
    }
}

fn shown_ids(tree: &CommentTree) -> Vec<String> {
    tree.render()
        .into_iter()
        .filter_map(|r| match r {
            Row::Comment(r) => Some(r.comment.id.0.clone()),
            Row::NoComments => None,
        })
        .collect()
}

#[tokio::test]
async fn load_render_and_toggle() {
    let svc = service();
    let mut session = ArticleSession::new();
    let t = session.refresh_history();
    assert!(session.complete_history(t.fetch(&svc).await));
    assert!(session.history().is_empty());

    let t = session
        .submit_query("https://www.jisilu.cn/question/517247")
        .unwrap();
    let h = session.complete_load(t.fetch(&svc).await).unwrap();
    session.complete_history(h.fetch(&svc).await);

    let article = session.article().unwrap().clone();
    assert_eq!(article.id.as_str(), "517247");
    assert!(session.history().iter().any(|e| e.id.as_str() == "517247"));

    let mut tree = CommentTree::new(article.comments.clone());
    assert_eq!(shown_ids(&tree), vec!["1", "2"]);
    tree.toggle(&CommentId(String::from("1")));
    assert_eq!(shown_ids(&tree), vec!["1"]);
}

#[tokio::test]
async fn forced_refresh_bypasses_cache() {
    let svc = service();
    let mut session = ArticleSession::new();
    load(&mut session, &svc, "517247", false).await;
    load(&mut session, &svc, "517247", false).await;
    assert_eq!(svc.lock().await.test_upstream_fetches(), 1);

    svc.lock().await.publish(article("517247", "盖楼 (edited)"));
    load(&mut session, &svc, "517247", false).await;
    assert_eq!(session.article().unwrap().title, "盖楼");

    let t = session.force_refresh().unwrap();
    assert_eq!(session.status(), Status::Refreshing);
    session.complete_load(t.fetch(&svc).await);
    assert_eq!(session.article().unwrap().title, "盖楼 (edited)");
    assert_eq!(svc.lock().await.test_upstream_fetches(), 2);
}

#[tokio::test]
async fn failed_forced_refresh_keeps_displayed_article() {
    let svc = service();
    svc.lock()
        .await
        .fail_upstream(ArticleId(String::from("999")), api::Error::Unknown(String::from("not found")));
    let mut session = ArticleSession::new();
    load(&mut session, &svc, "517247", false).await;
    let generation = session.generation();

    load(&mut session, &svc, "999", true).await;
    assert_eq!(session.article().unwrap().id.as_str(), "517247");
    assert_eq!(session.generation(), generation);
    assert_eq!(
        session.error(),
        Some(&Error::ServiceError {
            detail: String::from("not found")
        })
    );
    assert_eq!(session.error().unwrap().to_string(), "not found");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn unknown_article_is_a_service_error() {
    let svc = service();
    let mut session = ArticleSession::new();
    load(&mut session, &svc, "999", false).await;
    assert!(session.article().is_none());
    assert!(matches!(session.error(), Some(Error::ServiceError { .. })));
}

#[tokio::test]
async fn late_response_does_not_win() {
    let svc = service();
    let mut session = ArticleSession::new();
    let a = session.load_article(ArticleId(String::from("42")), false);
    let b = session.load_article(ArticleId(String::from("517247")), false);
    let (a, b) = join(a.fetch(&svc), b.fetch(&svc)).await;

    // b resolves first, a last
    let h = session.complete_load(b);
    assert!(session.complete_load(a).is_none());
    assert_eq!(session.article().unwrap().id.as_str(), "517247");

    // history refreshes race the same way
    let older = h.unwrap();
    let newer = session.refresh_history();
    let newer = newer.fetch(&svc).await;
    let older = older.fetch(&svc).await;
    assert!(session.complete_history(newer));
    assert!(!session.complete_history(older));
}

#[tokio::test]
async fn history_ordering_follows_the_server() {
    let svc = service();
    let mut session = ArticleSession::new();
    load(&mut session, &svc, "42", false).await;
    load(&mut session, &svc, "517247", false).await;
    let ids = session
        .history()
        .iter()
        .map(|e| e.id.0.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["517247", "42"]);
    assert_eq!(svc.history().await.unwrap().len(), 2);
}

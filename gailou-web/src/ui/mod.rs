mod app;
pub use app::App;

mod article_view;
pub use article_view::ArticleView;

mod comment_tree;
pub use comment_tree::CommentTree;

mod error_banner;
pub use error_banner::ErrorBanner;

mod history_list;
pub use history_list::HistoryList;

mod loading_spinner;
pub use loading_spinner::LoadingSpinner;

mod query_bar;
pub use query_bar::QueryBar;

mod settings_menu;
pub use settings_menu::SettingsMenu;

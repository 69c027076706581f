pub mod category;
pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use category::{normalize, Category, MAX_CATEGORIES};
pub use error::{Error, Result};
pub use models::{Classifier, InferenceModel};
pub use storage::{ArticleStorage, Storage, UserStorage};
pub use types::{Article, ArticleDraft, ArticleUpdate, NewArticle, User};

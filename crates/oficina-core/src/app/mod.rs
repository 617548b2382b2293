//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder / App**: ワイヤリングと、ユーザー操作（add/delete）の
//!   2 つのコマンドハンドラ
//! - **hydrate**: 起動時に外部ストアから TaskStore を復元（1 回だけ）
//! - **PersisterLoop**: 変更のたびに全量を書き戻す background save

pub mod builder;
pub mod hydrator;
pub mod persister_loop;

pub use self::builder::{App, AppBuilder, BuildError, TASKS_STORAGE_KEY};
pub use self::hydrator::hydrate;
pub use self::persister_loop::PersisterLoop;

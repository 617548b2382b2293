//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部コラボレータ（永続ストア、時刻、ID 生成、通知表示）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - in-memory の TaskStore が現セッションの正本（source of truth）
//! - KeyValueStore はシリアライズ済みコピーの保存先（last-write-wins）
//! - 通知は NoticeSink 経由で UI に届く（core は UI を知らない）

pub mod clock;
pub mod id_generator;
pub mod key_value_store;
pub mod notice_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::key_value_store::{KeyValueStore, StorageError};
pub use self::notice_sink::{NoopNoticeSink, NoticeSink, RecordingNoticeSink};

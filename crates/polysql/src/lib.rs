//! # polysql
//!
//! A database-agnostic SELECT builder.
//!
//! ## Features
//!
//! - **One builder, many databases**: quoting, parameter markers, paging and
//!   literals come from a [`Dialect`] (SQL Server, MySQL, PostgreSQL, SQLite, Oracle)
//! - **Parameters by default**: every value is bound under a generated name
//!   (`@_p_0`, `:_p_0`); [`SqlBuilder::params`] hands the table to the executor
//! - **Entity aware**: entity names resolve to tables and columns through an
//!   [`EntityMetadata`](entity::EntityMetadata) provider, with automatic aliases
//! - **Global filters**: predicates such as soft delete are injected into every query
//! - **Cheap copies**: `Clone` is a deep copy, so a base query can be forked
//!
//! ## Quick start
//!
//! ```rust
//! use polysql::{DialectKind, Pager, SqlBuilder};
//!
//! let mut builder = SqlBuilder::for_dialect(DialectKind::PgSql);
//! builder
//!     .select("u.Id, u.Name")
//!     .from_as("User", Some("u"))
//!     .contains("u.Name", "ann")
//!     .page(Some(&Pager::new(2, 10).with_order("u.Name desc")));
//!
//! let sql = builder.to_sql()?;
//! assert!(sql.starts_with("SELECT \"u\".\"Id\", \"u\".\"Name\"\nFROM \"User\" AS \"u\""));
//! assert!(sql.ends_with("ORDER BY \"u\".\"Name\" DESC\nLIMIT @_p_2 OFFSET @_p_1"));
//! assert_eq!(builder.params().len(), 3);
//! # Ok::<(), polysql::SqlError>(())
//! ```

pub mod alias;
pub mod builder;
pub mod clause;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod factory;
pub mod filter;
pub mod ident;
pub mod pager;
pub mod param;
pub mod prelude;
pub mod value;

pub use alias::AliasRegister;
pub use builder::{DEFAULT_LOG_SQL_LENGTH, SqlBuilder};
pub use clause::{JoinKind, SortDir};
pub use condition::{Condition, Operator};
pub use config::SqlOptions;
pub use dialect::{Dialect, DialectKind};
pub use entity::{EntityDef, EntityMetadata, EntityResolver, MetadataRegistry, NoMetadata};
pub use error::{SqlError, SqlResult};
pub use factory::SqlBuilderFactory;
pub use filter::{FilterChain, SoftDeleteFilter, SqlContext, SqlFilter};
pub use ident::SqlItem;
pub use pager::Pager;
pub use param::ParameterManager;
pub use value::Value;

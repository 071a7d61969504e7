//! Convenient imports for typical `polysql` usage.
//!
//! ```ignore
//! use polysql::prelude::*;
//! ```

pub use crate::{
    Condition, DialectKind, JoinKind, Operator, Pager, SqlBuilder, SqlBuilderFactory, SqlError,
    SqlOptions, SqlResult, Value,
};
pub use crate::entity::{Entity, EntityDef, MetadataRegistry};
pub use crate::filter::{SqlContext, SqlFilter};

use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Unique account identifier, immutable once the account is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl_id!(AccountId);

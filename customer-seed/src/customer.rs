use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every generated customer belongs to the same branch.
pub const BRANCH_ID: u32 = 1;

/// Column names of the output file, in row order
pub const HEADER: [&str; 8] = [
    "customer_id",
    "first_name",
    "last_name",
    "email",
    "phone_number",
    "address",
    "date_of_birth",
    "branch_id",
];

/// One row of seed data. Field order is the column order of [`HEADER`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// Single line, see [`flatten_address`]
    pub address: String,
    /// Serialized as `YYYY-MM-DD`
    pub date_of_birth: NaiveDate,
    pub branch_id: u32,
}

/// Replaces every line break in a postal address with `", "` so the record fits
/// on one row. `\r\n` counts as a single break.
#[must_use]
pub fn flatten_address(address: &str) -> String {
    address.replace("\r\n", "\n").replace(['\n', '\r'], ", ")
}

mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(kind = "Person")]
/// struct Person {
///     #[record(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// - `#[record(kind = "...")]` sets the human readable record kind used in
///   lookup errors. If omitted, defaults to the struct name.
/// - `#[record(id)]` marks the field holding the primary key.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

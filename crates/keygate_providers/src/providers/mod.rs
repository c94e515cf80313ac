//! Builtin providers for secret detection.

mod aws;
mod firebase;
mod generic;
mod stripe;
mod supabase;

use crate::provider::Provider;

pub use aws::AwsProvider;
pub use firebase::FirebaseProvider;
pub use generic::GenericProvider;
pub use stripe::StripeProvider;
pub use supabase::SupabaseProvider;

/// Returns all builtin providers, one per supported service.
#[must_use]
pub fn builtin_providers() -> Vec<&'static dyn Provider> {
    vec![
        &SupabaseProvider,
        &StripeProvider,
        &AwsProvider,
        &FirebaseProvider,
        &GenericProvider,
    ]
}

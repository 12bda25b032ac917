//! When steps for language registry BDD scenarios.

use std::sync::Arc;

use super::world::{RegistryWorld, run_async};
use draftkit::language::{adapters::InMemoryManifestSource, services::LanguageRegistryService};
use rstest_bdd_macros::when;

#[when("the supported languages are requested")]
fn request_languages(world: &mut RegistryWorld) {
    let source = world.source_error.clone().map_or_else(
        || InMemoryManifestSource::new(world.manifest.clone()),
        InMemoryManifestSource::failing,
    );
    let service = LanguageRegistryService::new(Arc::new(source));
    world.outcome = Some(run_async(service.draft_languages()));
}

//! Given steps for language registry BDD scenarios.

use std::io;

use super::world::RegistryWorld;
use draftkit::language::{domain::ManifestLanguage, ports::ManifestSourceError};
use rstest_bdd_macros::given;

#[given(r#"Draft supports "{name}" with versions "{versions}""#)]
fn draft_supports_language(world: &mut RegistryWorld, name: String, versions: String) {
    let listed: Vec<String> = versions
        .split(',')
        .map(|version| version.trim().to_owned())
        .filter(|version| !version.is_empty())
        .collect();
    world
        .manifest
        .supported_languages
        .push(ManifestLanguage::new(name, listed));
}

#[given("Draft supports no languages")]
fn draft_supports_nothing(world: &mut RegistryWorld) {
    world.manifest.supported_languages.clear();
}

#[given("the Draft tool is not installed")]
fn draft_not_installed(world: &mut RegistryWorld) {
    world.source_error = Some(ManifestSourceError::unavailable(io::Error::new(
        io::ErrorKind::NotFound,
        "draft: command not found",
    )));
}

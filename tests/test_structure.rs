use oxidized_registry::error::RegistryError;
use oxidized_registry::structure::validate_structure;
use std::fs;
use std::path::Path;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A registry root plus an icons directory next to it.
fn registry() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("registry")).unwrap();
    fs::create_dir_all(dir.path().join(".icons")).unwrap();
    dir
}

fn rule_ids(dir: &Path) -> Vec<String> {
    validate_structure(&dir.join("registry"), &dir.join(".icons"))
        .unwrap()
        .into_iter()
        .map(|f| f.rule_id)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn well_formed_registry_is_clean() {
    let dir = registry();
    let ns = dir.path().join("registry/alice");
    write(&ns.join("README.md"), "");
    write(&ns.join(".images/avatar.png"), "");
    write(&ns.join("modules/tmux/README.md"), "");
    write(&ns.join("modules/tmux/main.tf"), "");
    write(&ns.join("templates/docker/README.md"), "");
    write(&ns.join("templates/docker/main.tf"), "");
    assert!(rule_ids(dir.path()).is_empty());
}

#[test]
fn unreadable_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = validate_structure(&dir.path().join("missing"), &dir.path().join(".icons")).unwrap_err();
    assert!(matches!(err, RegistryError::RootUnreadable { .. }));
}

#[test]
fn missing_icons_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("registry")).unwrap();
    assert_eq!(rule_ids(dir.path()), vec!["structure/missing-icons-dir"]);
}

#[test]
fn files_at_registry_root_are_rejected() {
    let dir = registry();
    write(&dir.path().join("registry/notes.txt"), "");
    assert_eq!(rule_ids(dir.path()), vec!["structure/non-directory-entry"]);
}

#[test]
fn namespace_names_are_restricted() {
    let dir = registry();
    for name in ["-alice", "bob_", "carol"] {
        write(&dir.path().join("registry").join(name).join("README.md"), "");
    }
    assert_eq!(
        rule_ids(dir.path()),
        vec!["structure/invalid-namespace-name", "structure/invalid-namespace-name"]
    );
}

#[test]
fn namespace_without_profile_is_reported() {
    let dir = registry();
    fs::create_dir_all(dir.path().join("registry/alice")).unwrap();
    assert_eq!(rule_ids(dir.path()), vec!["structure/missing-readme"]);
}

#[test]
fn unsupported_namespace_subdirectory_is_reported() {
    let dir = registry();
    write(&dir.path().join("registry/alice/README.md"), "");
    write(&dir.path().join("registry/alice/scripts/run.sh"), "");
    // Plain files next to the profile are allowed.
    write(&dir.path().join("registry/alice/LICENSE"), "");
    assert_eq!(rule_ids(dir.path()), vec!["structure/unsupported-subdirectory"]);
}

#[test]
fn resource_reports_missing_readme_and_main_tf_separately() {
    let dir = registry();
    write(&dir.path().join("registry/alice/README.md"), "");
    fs::create_dir_all(dir.path().join("registry/alice/modules/empty")).unwrap();
    assert_eq!(
        rule_ids(dir.path()),
        vec!["structure/missing-readme", "structure/missing-main-tf"]
    );
}

#[test]
fn resource_names_are_restricted_and_build_artifacts_ignored() {
    let dir = registry();
    let ns = dir.path().join("registry/alice");
    write(&ns.join("README.md"), "");
    write(&ns.join("templates/.coder/state.json"), "");
    write(&ns.join("templates/My_Template/README.md"), "");
    assert_eq!(rule_ids(dir.path()), vec!["structure/invalid-resource-name"]);
}

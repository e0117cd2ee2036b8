use oxidized_registry::document::{DocumentKind, ProfileDocument};
use oxidized_registry::entity::{decode, ContributorStatus, Entity};
use oxidized_registry::frontmatter::{parse_frontmatter, FieldValue};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn doc(kind: DocumentKind, raw: &str) -> ProfileDocument {
    let (path, key) = match kind {
        DocumentKind::Contributor => ("registry/alice/README.md", "alice"),
        DocumentKind::Module => ("registry/alice/modules/tmux/README.md", "alice/modules/tmux"),
        DocumentKind::Template => (
            "registry/alice/templates/docker/README.md",
            "alice/templates/docker",
        ),
    };
    ProfileDocument {
        path: PathBuf::from(path),
        kind,
        key: key.to_string(),
        raw: raw.to_string(),
    }
}

fn rule_ids(raw: &str, kind: DocumentKind) -> Vec<String> {
    match decode(&doc(kind, raw)) {
        Ok(_) => vec![],
        Err(findings) => findings.into_iter().map(|f| f.rule_id).collect(),
    }
}

// ---------------------------------------------------------------------------
// YAML subset
// ---------------------------------------------------------------------------

#[test]
fn block_sequence_attaches_to_preceding_key() {
    let map = parse_frontmatter("tags:\n- aws\n- \"gcp\"\nverified: true\n", 2).unwrap();
    assert_eq!(
        map.get("tags").unwrap().value,
        FieldValue::List(vec!["aws".into(), "gcp".into()])
    );
    assert_eq!(map.get("verified").unwrap().line, 5);
}

#[test]
fn empty_flow_sequence_is_an_empty_list() {
    let map = parse_frontmatter("tags: []\n", 1).unwrap();
    assert_eq!(map.get("tags").unwrap().value, FieldValue::List(vec![]));
}

#[test]
fn bare_key_and_null_are_null() {
    let map = parse_frontmatter("avatar:\nwebsite: ~\nbio: null\n", 1).unwrap();
    for key in ["avatar", "website", "bio"] {
        assert_eq!(map.get(key).unwrap().value, FieldValue::Null, "{key}");
    }
}

#[test]
fn every_malformed_line_is_reported() {
    let errs = parse_frontmatter("github alice\n- stray\nbio:text\n", 10).unwrap_err();
    let lines: Vec<_> = errs.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![10, 11, 12]);
}

#[test]
fn duplicate_keys_are_rejected() {
    let errs = parse_frontmatter("github: alice\ngithub: bob\n", 2).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].line, 3);
    assert!(errs[0].message.contains("first defined on line 2"));
}

#[test]
fn list_item_after_scalar_is_rejected() {
    let errs = parse_frontmatter("tags: aws\n- gcp\n", 1).unwrap_err();
    assert!(errs[0].message.contains("scalar"));
}

#[test]
fn block_scalars_are_reported_once_on_the_key_line() {
    for indicator in ["|", ">", "|-", ">+", "|2"] {
        let text = format!("description: {indicator}\nfirst line\n- not a list item\nsecond line\ngithub: alice\n");
        let errs = parse_frontmatter(&text, 2).unwrap_err();
        assert_eq!(errs.len(), 1, "{indicator}");
        assert_eq!(errs[0].line, 2);
        assert!(errs[0].message.contains("block scalar"));
    }
}

#[test]
fn pipe_inside_a_plain_scalar_is_fine() {
    let map = parse_frontmatter("bio: cats | dogs
website: >https://alice.dev
", 2).unwrap();
    assert_eq!(map.get("bio").unwrap().value, FieldValue::Scalar("cats | dogs".into()));
    assert_eq!(map.len(), 2);
}

#[test]
fn multi_line_plain_scalar_is_rejected() {
    let errs = parse_frontmatter("description: Install tmux\nand start a session\n", 2).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].line, 3);
    assert!(errs[0].message.starts_with("expected `key: value`"));
}

#[test]
fn block_scalar_description_is_a_parse_error() {
    let raw = "---\ndescription: >\nInstall tmux\nicon: ./tmux.svg\ntags: []\n---\n\n# tmux\n";
    assert_eq!(
        rule_ids(raw, DocumentKind::Module),
        vec!["parse/invalid-frontmatter"]
    );
}

// ---------------------------------------------------------------------------
// Typed decoding
// ---------------------------------------------------------------------------

#[test]
fn contributor_profile_decodes() {
    let raw = "---\ndisplay_name: Alice\ngithub: alice\nstatus: partner\nemployer_github: coder-labs\n---\n\n# Alice\n\nBio text.\n";
    let Ok(Entity::Contributor(profile)) = decode(&doc(DocumentKind::Contributor, raw)) else {
        panic!("expected a contributor profile");
    };
    assert_eq!(profile.display_name.as_deref(), Some("Alice"));
    assert_eq!(profile.employer_github.as_deref(), Some("coder-labs"));
    assert_eq!(profile.status(), ContributorStatus::Partner);
    assert_eq!(profile.avatar, None);
    assert_eq!(profile.source.body, "# Alice\n\nBio text.");
    assert_eq!(profile.source.body_line, 8);
    assert_eq!(profile.source.line_of("github"), Some(3));
}

#[test]
fn missing_status_defaults_to_community() {
    let raw = "---\ngithub: alice\n---\n";
    let Ok(Entity::Contributor(profile)) = decode(&doc(DocumentKind::Contributor, raw)) else {
        panic!("expected a contributor profile");
    };
    assert_eq!(profile.status(), ContributorStatus::Community);
}

#[test]
fn resource_distinguishes_missing_and_empty_tags() {
    let with_empty = "---\ndescription: d\ntags: []\n---\n# T\n";
    let Ok(Entity::Resource(r)) = decode(&doc(DocumentKind::Template, with_empty)) else {
        panic!("expected a resource");
    };
    assert_eq!(r.tags, Some(vec![]));

    let without = "---\ndescription: d\n---\n# T\n";
    let Ok(Entity::Resource(r)) = decode(&doc(DocumentKind::Template, without)) else {
        panic!("expected a resource");
    };
    assert_eq!(r.tags, None);
}

#[test]
fn unknown_key_is_a_parse_error() {
    assert_eq!(
        rule_ids("---\ngithub: alice\ntwitter: '@alice'\n---\n", DocumentKind::Contributor),
        vec!["parse/unknown-key"]
    );
    // Resource keys are not valid on a profile and vice versa.
    assert_eq!(
        rule_ids("---\ndescription: d\ngithub: alice\n---\n", DocumentKind::Module),
        vec!["parse/unknown-key"]
    );
}

#[test]
fn wrong_shapes_are_parse_errors() {
    assert_eq!(
        rule_ids("---\ndescription: d\nverified: yes\ntags: aws\n---\n", DocumentKind::Module),
        vec!["parse/invalid-type", "parse/invalid-type"]
    );
    assert_eq!(
        rule_ids("---\ngithub: [alice, bob]\n---\n", DocumentKind::Contributor),
        vec!["parse/invalid-type"]
    );
}

#[test]
fn split_errors_become_parse_findings() {
    let findings = decode(&doc(DocumentKind::Contributor, "github: alice\n")).unwrap_err();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule_id, "parse/missing-opening-fence");
    assert!(findings[0].message.starts_with("failed to parse frontmatter"));
    assert_eq!(findings[0].file, Some(PathBuf::from("registry/alice/README.md")));
}

//! Builder system integration tests
//!
//! This file exercises the full lifecycle of a fixture: blueprint
//! registration, selection by key/index/default, override replay, best-fit
//! constructor matching with residual setter injection, and batch cycling.

use specimen::{
    BuildError, Builder, Construct, Constructor, Factory, Fixture, Kind, Member, OrderedMap,
    Param, Reflect, Setter, Value,
};
use std::cell::Cell;
use std::rc::Rc;

/// Candidate values for building a `Post`.
#[derive(Debug, Clone)]
struct PostSheet {
    tags: Vec<String>,
    metadata: String,
    author: Option<String>,
}

impl Reflect for PostSheet {
    fn members() -> Vec<Member> {
        vec![
            Member::new("tags", Kind::List),
            Member::new("metadata", Kind::Str),
            Member::new("author", Kind::Option(Box::new(Kind::Str))),
        ]
    }

    fn get_member(&self, name: &str) -> Option<Value> {
        match name {
            "tags" => Some(Value::List(
                self.tags.iter().map(|t| Value::Str(t.clone())).collect(),
            )),
            "metadata" => Some(Value::Str(self.metadata.clone())),
            "author" => Some(self.author.clone().into()),
            _ => None,
        }
    }

    fn set_member(&mut self, name: &str, value: Value) -> specimen::Result<()> {
        match (name, value) {
            ("tags", Value::List(items)) => {
                self.tags = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect();
            }
            ("metadata", Value::Str(s)) => self.metadata = s,
            ("author", Value::Str(s)) => self.author = Some(s),
            ("author", Value::Null) => self.author = None,
            _ => panic!("unexpected assignment"),
        }
        Ok(())
    }
}

/// The externally-owned target. Its only constructor takes `tags`;
/// `metadata` is settable afterwards; `date` has a fixed default the engine
/// must leave alone.
#[derive(Debug, PartialEq)]
struct Post {
    tags: Vec<String>,
    metadata: String,
    date: &'static str,
}

impl Construct for Post {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(
            vec![Param::new("tags", Kind::List)],
            |args| Post {
                tags: args[0].to_string_vec().unwrap_or_default(),
                metadata: String::new(),
                date: "2001-01-01",
            },
        )]
    }

    fn setters() -> Vec<Setter<Self>> {
        vec![Setter::new("metadata", Kind::Str, |t, v| {
            t.metadata = v.as_str().unwrap_or_default().to_owned()
        })]
    }
}

struct Posts;

impl Fixture for Posts {
    type Blueprint = PostSheet;
    type Target = Post;

    fn blueprints(reg: &mut OrderedMap<Factory<PostSheet>>) {
        reg.insert(
            "draft",
            Box::new(|| PostSheet {
                tags: vec!["draft".into()],
                metadata: "unreviewed".into(),
                author: None,
            }) as Factory<PostSheet>,
        );
        reg.insert(
            "Alt",
            Box::new(|| PostSheet {
                tags: vec!["alt".into(), "variant".into()],
                metadata: "reviewed".into(),
                author: Some("editor".into()),
            }) as Factory<PostSheet>,
        );
        reg.insert(
            "archive",
            Box::new(|| PostSheet {
                tags: vec!["old".into()],
                metadata: "frozen".into(),
                author: None,
            }) as Factory<PostSheet>,
        );
    }
}

#[test]
fn test_constructor_setter_split_preserves_target_default() {
    let builder = Builder::<Posts>::create().unwrap();
    let post = builder.build().unwrap();

    // tags arrived through the constructor, metadata through the setter.
    assert_eq!(post.tags, vec!["draft".to_string()]);
    assert_eq!(post.metadata, "unreviewed");
    // `date` has no blueprint counterpart; the target default is untouched.
    assert_eq!(post.date, "2001-01-01");
}

#[test]
fn test_key_selection_is_case_insensitive() {
    let builder = Builder::<Posts>::create().unwrap();
    let lower = builder.build_key("alt").unwrap();
    let upper = builder.build_key("ALT").unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.metadata, "reviewed");
}

#[test]
fn test_key_index_mismatch_fails() {
    let builder = Builder::<Posts>::create().unwrap();
    // "Alt" sits at position 1.
    assert!(builder.build_with(Some("alt"), Some(1)).is_ok());
    let err = builder.build_with(Some("alt"), Some(2)).unwrap_err();
    assert!(matches!(err, BuildError::KeyIndexMismatch { .. }));
}

#[test]
fn test_index_selection_and_range_check() {
    let builder = Builder::<Posts>::create().unwrap();
    assert_eq!(builder.build_index(2).unwrap().metadata, "frozen");
    assert!(matches!(
        builder.build_index(3),
        Err(BuildError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn test_duplicate_registration_overwrites_in_place() {
    struct Shadowed;
    impl Fixture for Shadowed {
        type Blueprint = PostSheet;
        type Target = Post;
        fn blueprints(reg: &mut OrderedMap<Factory<PostSheet>>) {
            Posts::blueprints(reg);
            // Collides with "draft" (case-insensitive); same position, new factory.
            reg.insert(
                "DRAFT",
                Box::new(|| PostSheet {
                    tags: vec!["redrafted".into()],
                    metadata: "v2".into(),
                    author: None,
                }) as Factory<PostSheet>,
            );
        }
    }

    let builder = Builder::<Shadowed>::create().unwrap();
    assert_eq!(builder.blueprint_count(), 3);
    // Still first in registration order, but the later factory runs.
    let post = builder.build_index(0).unwrap();
    assert_eq!(post.tags, vec!["redrafted".to_string()]);
    assert_eq!(post.metadata, "v2");
}

#[test]
fn test_missing_required_member_is_instantiation_error() {
    #[derive(Debug, Clone)]
    struct BareSheet;
    impl Reflect for BareSheet {
        fn members() -> Vec<Member> {
            vec![Member::new("metadata", Kind::Str)]
        }
        fn get_member(&self, name: &str) -> Option<Value> {
            match name {
                "metadata" => Some(Value::Str("only-metadata".into())),
                _ => None,
            }
        }
        fn set_member(&mut self, _: &str, _: Value) -> specimen::Result<()> {
            Ok(())
        }
    }

    struct Bare;
    impl Fixture for Bare {
        type Blueprint = BareSheet;
        type Target = Post;
        fn blueprints(reg: &mut OrderedMap<Factory<BareSheet>>) {
            reg.insert("bare", Box::new(|| BareSheet) as Factory<BareSheet>);
        }
    }

    // `Post`'s only constructor needs `tags`; the blueprint has none.
    let builder = Builder::<Bare>::create().unwrap();
    let err = builder.build().unwrap_err();
    match err {
        BuildError::NoUsableConstructor { target, blueprint } => {
            assert!(target.contains("Post"));
            assert!(blueprint.contains("BareSheet"));
        }
        other => panic!("expected NoUsableConstructor, got {:?}", other),
    }
}

#[test]
fn test_override_beats_blueprint_value_everywhere() {
    let mut builder = Builder::<Posts>::create().unwrap();
    builder.set("metadata", "pinned").unwrap();

    assert_eq!(builder.build().unwrap().metadata, "pinned");
    assert_eq!(builder.build_key("alt").unwrap().metadata, "pinned");
    assert_eq!(builder.build_index(2).unwrap().metadata, "pinned");
}

#[test]
fn test_derived_override_reads_snapshot_state() {
    let mut builder = Builder::<Posts>::create().unwrap();
    builder
        .set_with("metadata", |sheet: &PostSheet| {
            Value::Str(format!("{}-tagged-{}", sheet.metadata, sheet.tags.len()))
        })
        .unwrap();

    assert_eq!(builder.build().unwrap().metadata, "unreviewed-tagged-1");
    assert_eq!(builder.build_key("alt").unwrap().metadata, "reviewed-tagged-2");
}

#[test]
fn test_build_each_one_per_key_in_order() {
    let builder = Builder::<Posts>::create().unwrap();
    let metas: Vec<String> = builder
        .build_each(&["archive", "draft"])
        .map(|r| r.unwrap().metadata)
        .collect();
    assert_eq!(metas, vec!["frozen".to_string(), "unreviewed".to_string()]);
}

#[test]
fn test_cycle_positions_with_counter_generator() {
    let mut builder = Builder::<Posts>::create().unwrap();
    let counter = Rc::new(Cell::new(0u32));
    let handle = Rc::clone(&counter);
    builder
        .set_with("metadata", move |_| {
            let n = handle.get();
            handle.set(n + 1);
            Value::Str(format!("item-{}", n))
        })
        .unwrap();

    let posts: Vec<Post> = builder
        .build_cycle(6, &[])
        .map(|r| r.unwrap())
        .collect();

    // Three registered blueprints, cycled twice: 0,1,2,0,1,2.
    let first_tags: Vec<&str> = posts.iter().map(|p| p.tags[0].as_str()).collect();
    assert_eq!(first_tags, vec!["draft", "alt", "old", "draft", "alt", "old"]);
    // The captured counter ticks once per built item.
    let metas: Vec<&str> = posts.iter().map(|p| p.metadata.as_str()).collect();
    assert_eq!(metas, vec!["item-0", "item-1", "item-2", "item-3", "item-4", "item-5"]);
}

#[test]
fn test_cycle_restricted_to_given_keys() {
    let builder = Builder::<Posts>::create().unwrap();
    let firsts: Vec<String> = builder
        .build_cycle(6, &["archive", "draft"])
        .map(|r| r.unwrap().tags[0].clone())
        .collect();
    assert_eq!(firsts, vec!["old", "draft", "old", "draft", "old", "draft"]);
}

#[test]
fn test_repeat_builds_are_independent_instances() {
    let builder = Builder::<Posts>::create().unwrap();
    let mut a = builder.build_key("alt").unwrap();
    let b = builder.build_key("alt").unwrap();

    assert_eq!(a, b);
    // Mutating one must not affect the other.
    a.tags.push("mutated".into());
    assert_eq!(b.tags.len(), 2);
}

#[test]
fn test_selector_shape_checked_at_set_time() {
    let mut builder = Builder::<Posts>::create().unwrap();
    assert!(matches!(
        builder.set("metadata.inner", "x"),
        Err(BuildError::BadSelector { .. })
    ));
    assert!(matches!(
        builder.set("publisher", "x"),
        Err(BuildError::UnknownMember { .. })
    ));
}

#[test]
fn test_conversion_error_reported_at_build() {
    let mut builder = Builder::<Posts>::create().unwrap();
    // A list is not convertible to the `metadata` string member; accepted
    // here, rejected when the chain replays.
    builder
        .set("metadata", Value::List(vec![Value::Int(1)]))
        .unwrap();
    assert!(matches!(
        builder.build(),
        Err(BuildError::Conversion { .. })
    ));
}

// tests/pattern_properties.rs

use proptest::prelude::*;
use sitewatch::fs::mock::MockFileSystem;
use sitewatch::watch::{PathMatcher, METADATA_FILE};
use sitewatch_test_utils::builders::WatchConfigBuilder;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,8}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

proptest! {
    #[test]
    fn excluded_dir_matches_itself_and_nested_paths(
        dir in segment(),
        child in segment(),
        grandchild in segment(),
    ) {
        let fs = MockFileSystem::new();
        fs.add_dir(format!("/s/{dir}"));

        let cfg = WatchConfigBuilder::new("/s").exclude(&dir).build();
        let ignore = PathMatcher::new(&fs).compute_ignore_patterns(&cfg);

        let expected_prefix = format!("{dir}/");
        prop_assert!(ignore.prefixes().contains(&expected_prefix.as_str()));
        prop_assert!(ignore.is_match(&dir));
        let nested = format!("{dir}/{child}");
        let deeper = format!("{dir}/{child}/{grandchild}");
        prop_assert!(ignore.is_match(&nested));
        prop_assert!(ignore.is_match(&deeper));
    }

    #[test]
    fn excludes_outside_the_source_never_produce_patterns(name in segment()) {
        let fs = MockFileSystem::new();
        fs.add_dir("/s");
        fs.add_dir(format!("/outside/{name}"));

        let cfg = WatchConfigBuilder::new("/s")
            .exclude(format!("/outside/{name}"))
            .exclude(format!("../outside/{name}"))
            .build();
        let ignore = PathMatcher::new(&fs).compute_ignore_patterns(&cfg);

        prop_assert_eq!(ignore.prefixes(), vec![METADATA_FILE]);
    }

    #[test]
    fn missing_excludes_never_produce_patterns(names in proptest::collection::vec(segment(), 0..6)) {
        let fs = MockFileSystem::new();
        fs.add_dir("/s");

        let mut builder = WatchConfigBuilder::new("/s");
        for name in &names {
            builder = builder.exclude(name);
        }
        let ignore = PathMatcher::new(&fs).compute_ignore_patterns(&builder.build());

        prop_assert_eq!(ignore.prefixes(), vec![METADATA_FILE]);
    }
}

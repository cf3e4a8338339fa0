//! Integration tests for s3tree


use harness::{build_tree, render, sample_bucket};
use s3tree::output::write_metrics;
use s3tree::test_utils::{FakeBucket, FixedMetrics, ScriptedListing};
use s3tree::{Entry, Error, ListingError, Metric, WalkerConfig, collect_metrics};
use termcolor::NoColor;

const SAMPLE_TREE: &str = "\
< bkt/ >
├── PREFIX - folderA/
│   ├── 10 - obj1
│   └── 20 - obj2
└── PREFIX - folderB/
    └── 5 - obj3
";

#[test]
fn test_basic_tree_output() {
    let (text, result) = render(&sample_bucket(), WalkerConfig::default(), "bkt", "");
    let summary = result.unwrap();

    assert_eq!(text, SAMPLE_TREE);
    assert_eq!(summary.prefixes, 2);
    assert_eq!(summary.objects, 3);
    assert_eq!(summary.total_bytes, 35);
}

#[test]
fn test_each_prefix_listed_once() {
    let bucket = sample_bucket();
    let (_text, result) = render(&bucket, WalkerConfig::default(), "bkt", "");
    assert!(result.is_ok());
    assert_eq!(bucket.listed_prefixes(), vec!["", "folderA/", "folderB/"]);
}

#[test]
fn test_page_size_does_not_change_output() {
    let keys = [
        ("a.txt", 1),
        ("docs/guide.md", 2),
        ("docs/img/logo.png", 3),
        ("docs/img/wide.png", 4),
        ("docs/index.md", 5),
        ("src/lib.rs", 6),
        ("src/main.rs", 7),
        ("z", 8),
    ];
    let bucket_with_pages = |page_size| {
        keys.iter()
            .fold(FakeBucket::new(), |bucket, (key, size)| {
                bucket.with_object(key, *size)
            })
            .with_page_size(page_size)
    };

    let (expected, result) = render(&bucket_with_pages(1000), WalkerConfig::default(), "bkt", "");
    assert!(result.is_ok());

    for page_size in [1, 2, 3] {
        let bucket = bucket_with_pages(page_size);
        let (text, result) = render(&bucket, WalkerConfig::default(), "bkt", "");
        assert!(result.is_ok());
        assert_eq!(text, expected, "page size {}", page_size);
        assert!(bucket.requests().iter().any(|r| r.page > 1));
    }
}

#[test]
fn test_last_flag_spans_pages() {
    let listing = ScriptedListing::new()
        .with_pages("", vec![vec![Entry::group("a/")], vec![Entry::leaf("z", 3)]])
        .with_pages("a/", vec![vec![Entry::leaf("a/1", 1)]]);

    let (text, result) = render(&listing, WalkerConfig::default(), "bkt", "");
    assert!(result.is_ok());
    assert_eq!(
        text,
        "< bkt/ >\n├── PREFIX - a/\n│   └── 1 - 1\n└── 3 - z\n"
    );
}

#[test]
fn test_listing_failure_stops_the_walk() {
    let bucket = sample_bucket().failing_on_page("folderB/", 1);
    let (text, result) = render(&bucket, WalkerConfig::default(), "bkt", "");

    assert_eq!(
        text,
        "< bkt/ >\n├── PREFIX - folderA/\n│   ├── 10 - obj1\n│   └── 20 - obj2\n└── PREFIX - folderB/\n"
    );
    match result {
        Err(Error::Listing(ListingError::Request { prefix, page, .. })) => {
            assert_eq!(prefix, "folderB/");
            assert_eq!(page, 1);
        }
        other => panic!("expected a listing error, got {:?}", other),
    }
}

#[test]
fn test_failure_on_later_page_keeps_earlier_lines() {
    let listing = ScriptedListing::new().with_results(
        "",
        vec![
            Ok(vec![Entry::leaf("a", 1), Entry::leaf("b", 2)]),
            Err("boom".to_string()),
        ],
    );

    let (text, result) = render(&listing, WalkerConfig::default(), "bkt", "");
    assert_eq!(text, "< bkt/ >\n├── 1 - a\n");
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "listing bkt/ failed on page 2: boom");
}

#[test]
fn test_failure_is_not_retried() {
    let bucket = sample_bucket().failing_on_page("folderA/", 1);
    let (_text, result) = render(&bucket, WalkerConfig::default(), "bkt", "");

    assert!(result.is_err());
    assert_eq!(bucket.listed_prefixes(), vec!["", "folderA/"]);
}

#[test]
fn test_starting_prefix() {
    let (text, result) = render(&sample_bucket(), WalkerConfig::default(), "bkt", "folderA/");
    assert!(result.is_ok());
    assert_eq!(text, "< bkt/folderA/ >\n├── 10 - obj1\n└── 20 - obj2\n");
}

#[test]
fn test_empty_bucket_prints_only_root() {
    let (text, result) = render(&FakeBucket::new(), WalkerConfig::default(), "bkt", "");
    assert_eq!(result.unwrap().objects, 0);
    assert_eq!(text, "< bkt/ >\n");
}

#[test]
fn test_object_after_groups_closes_the_level() {
    let bucket = FakeBucket::new().with_object("a/x", 1).with_object("b", 2);
    let (text, result) = render(&bucket, WalkerConfig::default(), "bkt", "");
    assert!(result.is_ok());
    assert_eq!(text, "< bkt/ >\n├── PREFIX - a/\n│   └── 1 - x\n└── 2 - b\n");
}

#[test]
fn test_custom_delimiter() {
    let bucket = FakeBucket::new()
        .with_object("logs-app-1", 1)
        .with_object("logs-db-1", 2);
    let config = WalkerConfig {
        delimiter: '-',
        ..Default::default()
    };

    let (text, result) = render(&bucket, config, "bkt", "");
    assert!(result.is_ok());
    assert_eq!(
        text,
        "\
< bkt/ >
└── PREFIX - logs-
    ├── PREFIX - app-
    │   └── 1 - 1
    └── PREFIX - db-
        └── 2 - 1
"
    );
}

#[test]
fn test_level_limit() {
    let bucket = sample_bucket();
    let config = WalkerConfig {
        max_depth: Some(1),
        ..Default::default()
    };

    let (text, result) = render(&bucket, config, "bkt", "");
    assert!(result.is_ok());
    assert_eq!(text, "< bkt/ >\n├── PREFIX - folderA/\n└── PREFIX - folderB/\n");
    assert_eq!(bucket.listed_prefixes(), vec![""]);
}

#[test]
fn test_ignore_pattern_moves_last_marker() {
    let config = WalkerConfig {
        ignore_patterns: vec!["obj2".to_string()],
        ..Default::default()
    };

    let (text, result) = render(&sample_bucket(), config, "bkt", "");
    assert!(result.is_ok());
    assert!(text.contains("│   └── 10 - obj1\n"), "{}", text);
    assert!(!text.contains("obj2"));
}

#[test]
fn test_json_tree() {
    let tree = build_tree(&sample_bucket(), WalkerConfig::default(), "bkt", "").unwrap();
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(value["container"], "bkt");
    assert_eq!(value["summary"]["objects"], 3);
    assert!(value.get("metrics").is_none());

    let folder_a = &value["children"][0];
    assert_eq!(folder_a["type"], "prefix");
    assert_eq!(folder_a["name"], "folderA");
    assert_eq!(folder_a["prefix"], "folderA/");
    assert_eq!(folder_a["children"][1]["type"], "object");
    assert_eq!(folder_a["children"][1]["key"], "folderA/obj2");
    assert_eq!(folder_a["children"][1]["size"], 20);
    assert_eq!(value["children"][1]["children"][0]["name"], "obj3");
}

#[test]
fn test_metrics_block_with_fallback() {
    let provider = FixedMetrics {
        size: Some(Metric::new(123.0, Some("Bytes".to_string()))),
        object_count: None,
    };
    let metrics = collect_metrics(&provider, "bkt");

    let mut out = NoColor::new(Vec::new());
    write_metrics(&mut out, "bkt", &metrics).unwrap();
    assert_eq!(
        String::from_utf8(out.into_inner()).unwrap(),
        "\nBucket Metrics:\n\nbkt: 123 Bytes\nbkt: 0 Object/s\n"
    );
}

//! Performance benchmarks for reqdrop

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reqdrop::distribution::{DistributionLookup, InstalledDistributions};
use reqdrop::resolver::resolve_requirements;
use reqdrop::test_utils::TestDir;
use reqdrop::{extract_imports, parse_imports};

// A typical script: a few stdlib modules, some third-party ones, and
// imports nested in functions and try blocks.
const SCRIPT_SOURCE: &str = r#"#!/usr/bin/env python3
"""Fetch a report and store it."""

import os
import sys
import json
from pathlib import Path
from collections import OrderedDict

import requests
import yaml

try:
    import ujson as fastjson
except ImportError:
    fastjson = None


class Store:
    def __init__(self, root):
        self.root = Path(root)

    def save(self, name, data):
        import gzip
        with gzip.open(self.root / name, "wt") as fh:
            json.dump(data, fh)


def main():
    from requests.adapters import HTTPAdapter
    session = requests.Session()
    session.mount("https://", HTTPAdapter(max_retries=3))
    report = session.get(os.environ["REPORT_URL"]).json()
    Store(sys.argv[1]).save("report.json.gz", OrderedDict(report))


if __name__ == "__main__":
    main()
"#;

/// Build a fake site-packages with `count` distributions.
fn create_site_packages(count: usize) -> TestDir {
    let dir = TestDir::new();
    for i in 0..count {
        let name = format!("package_{}", i);
        let module = format!("pkg{}", i);
        dir.add_dist_info("site", &name, "1.0.0", &[module.as_str()]);
    }
    dir.add_dist_info("site", "requests", "2.31.0", &["requests"]);
    dir.add_dist_info("site", "PyYAML", "6.0.1", &["_yaml", "yaml"]);
    dir
}

fn bench_import_extraction(c: &mut Criterion) {
    let dir = TestDir::new();
    let script = dir.add_file("script.py", SCRIPT_SOURCE);
    let large_source = SCRIPT_SOURCE.repeat(50);

    let mut group = c.benchmark_group("import_extraction");

    group.bench_function("parse_script", |b| {
        b.iter(|| parse_imports(black_box(SCRIPT_SOURCE)))
    });

    group.bench_function("parse_large_module", |b| {
        b.iter(|| parse_imports(black_box(&large_source)))
    });

    group.bench_function("extract_from_file", |b| {
        b.iter(|| extract_imports(black_box(&script)))
    });

    group.finish();
}

fn bench_site_packages_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("site_packages_scan");

    let small = create_site_packages(10);
    group.bench_function("small_site_10_dists", |b| {
        b.iter(|| InstalledDistributions::from_site_dirs([black_box(small.path().join("site"))]))
    });

    let large = create_site_packages(300);
    group.bench_function("large_site_300_dists", |b| {
        b.iter(|| InstalledDistributions::from_site_dirs([black_box(large.path().join("site"))]))
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let site = create_site_packages(300);
    let index = InstalledDistributions::from_site_dirs([site.path().join("site")]);
    let modules = parse_imports(SCRIPT_SOURCE).unwrap();

    let mut group = c.benchmark_group("resolution");

    group.bench_function("lookup_by_name", |b| {
        b.iter(|| index.lookup(black_box("requests")))
    });

    group.bench_function("lookup_by_top_level", |b| {
        b.iter(|| index.lookup(black_box("yaml")))
    });

    group.bench_function("resolve_script", |b| {
        b.iter(|| resolve_requirements(black_box(&modules), &index))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_import_extraction,
    bench_site_packages_scan,
    bench_resolution,
);
criterion_main!(benches);

use indexmap::IndexMap;
use oro_common::{package_id, Library};
use oro_package_json::{parse, parse_str, OroPackageJsonError, Package, PackageJsonParser};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, OroPackageJsonError>;

fn deps(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn full_manifest() -> Result<()> {
    let pkg = parse_str(
        r#"{"name":"left-pad","version":"1.3.0","license":"WTFPL","dependencies":{"foo":"^1.0.0"}}"#,
    )?;
    assert_eq!(
        pkg,
        Some(Package {
            library: Library {
                id: package_id("left-pad", "1.3.0"),
                name: "left-pad".into(),
                version: "1.3.0".into(),
                license: "WTFPL".into(),
            },
            dependencies: deps(&[("foo", "^1.0.0")]),
            optional_dependencies: IndexMap::new(),
        })
    );
    Ok(())
}

#[test]
fn empty_documents_describe_no_package() -> Result<()> {
    for input in [
        "{}",
        "  {}\n",
        r#"{"name": "", "version": ""}"#,
        r#"{"name": null, "license": null}"#,
        r#"{"license": "", "dependencies": {}, "optionalDependencies": {}}"#,
        r#"{"license": {"url": "https://example.com/LICENSE"}}"#,
        r#"{"license": {"type": 1}}"#,
        r#"{"license": ["MIT"]}"#,
        r#"{"description": "only unknown keys", "scripts": {"test": "jest"}}"#,
    ] {
        assert_eq!(parse_str(input)?, None, "input: {input}");
    }
    Ok(())
}

#[test]
fn nameless_with_license() -> Result<()> {
    let pkg = parse_str(r#"{"license": "MIT"}"#)?.unwrap();
    assert_eq!(pkg.library.name, "no-package-name");
    assert_eq!(pkg.library.version, "");
    assert_eq!(pkg.library.license, "MIT");
    assert_eq!(pkg.library.id, package_id("no-package-name", ""));
    Ok(())
}

#[test]
fn nameless_with_dependencies() -> Result<()> {
    let pkg = parse_str(r#"{"version": "0.1.0", "dependencies": {"react": "^18.2.0"}}"#)?.unwrap();
    assert_eq!(pkg.library.name, "no-package-name");
    assert_eq!(pkg.library.version, "0.1.0");
    assert_eq!(pkg.dependencies, deps(&[("react", "^18.2.0")]));
    Ok(())
}

#[test]
fn nameless_with_optional_dependencies() -> Result<()> {
    let pkg = parse_str(r#"{"optionalDependencies": {"fsevents": "~2.3.2"}}"#)?.unwrap();
    assert_eq!(pkg.library.name, "no-package-name");
    assert!(pkg.dependencies.is_empty());
    assert_eq!(pkg.optional_dependencies, deps(&[("fsevents", "~2.3.2")]));
    Ok(())
}

#[test]
fn name_only() -> Result<()> {
    let pkg = parse_str(r#"{"name": "workspace-root", "private": true}"#)?.unwrap();
    assert_eq!(pkg.library.name, "workspace-root");
    assert_eq!(pkg.library.id, package_id("workspace-root", ""));
    assert_eq!(pkg.library.license, "");
    Ok(())
}

#[test]
fn version_only_keeps_placeholder_name() -> Result<()> {
    let pkg = parse_str(r#"{"version": "2.0.0"}"#)?.unwrap();
    assert_eq!(pkg.library.name, "no-package-name");
    assert_eq!(pkg.library.id, package_id("no-package-name", "2.0.0"));
    Ok(())
}

#[test]
fn legacy_license_object() -> Result<()> {
    let pkg = parse_str(
        r#"{"name": "old", "version": "0.0.1", "license": {"type": "ISC", "url": "https://opensource.org/licenses/ISC"}}"#,
    )?
    .unwrap();
    assert_eq!(pkg.library.license, "ISC");
    Ok(())
}

#[test]
fn odd_license_shapes_do_not_block_extraction() -> Result<()> {
    let pkg = parse_str(
        r#"{"name": "odd", "license": {"type": ["MIT"]}, "dependencies": {"a": "1"}}"#,
    )?
    .unwrap();
    assert_eq!(pkg.library.license, "");
    assert_eq!(pkg.dependencies, deps(&[("a", "1")]));
    Ok(())
}

#[test]
fn dependency_order_is_preserved() -> Result<()> {
    let pkg = parse_str(r#"{"name": "x", "dependencies": {"zeta": "1", "alpha": "2", "mid": "3"}}"#)?
        .unwrap();
    assert_eq!(
        pkg.dependencies.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["zeta", "alpha", "mid"]
    );
    Ok(())
}

#[test]
fn malformed_json() {
    for input in [
        r#"{"name":"#,
        "",
        "not json",
        r#"{"name": "a",}"#,
        r#"{"name": "a"} trailing"#,
    ] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, OroPackageJsonError::DecodeError(_)),
            "input: {input}"
        );
    }
}

#[test]
fn wrong_shape() {
    for input in [
        "[]",
        "null",
        "42",
        r#""package""#,
        r#"{"name": 42}"#,
        r#"{"version": 1.0}"#,
        r#"{"dependencies": ["foo"]}"#,
        r#"{"optionalDependencies": {"foo": true}}"#,
    ] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, OroPackageJsonError::DecodeError(_)),
            "input: {input}"
        );
    }
}

#[test]
fn decode_error_keeps_location() {
    let err = parse_str("{\n  \"name\": \"a\",\n  \"version\": }").unwrap_err();
    let OroPackageJsonError::DecodeError(inner) = &err;
    assert_eq!(inner.line(), 3);
    assert!(err.to_string().starts_with("Failed to decode package.json"));
}

#[test]
fn reads_from_any_reader() -> Result<()> {
    let bytes = br#"{"name": "from-reader", "version": "1.0.0"}"#;
    let pkg = parse(&bytes[..])?.unwrap();
    assert_eq!(pkg.library.id, "from-reader@1.0.0");

    let cursor = std::io::Cursor::new(bytes.to_vec());
    let again = PackageJsonParser::new().parse(cursor)?.unwrap();
    assert_eq!(pkg, again);
    Ok(())
}

#[test]
fn same_bytes_same_result() -> Result<()> {
    let input = r#"{"name": "@scope/pkg", "version": "3.1.4", "license": {"type": "MIT"},
        "dependencies": {"b": "^1", "a": "^2"}, "optionalDependencies": {"c": "*"}}"#;
    let first = parse_str(input)?;
    let second = parse_str(input)?;
    assert_eq!(first, second);
    assert_eq!(first.unwrap().library.id, "@scope/pkg@3.1.4");
    Ok(())
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = PackageJsonParser::new();
    let handles = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let json = format!(r#"{{"name": "pkg-{i}", "version": "1.0.{i}"}}"#);
                parser.parse(json.as_bytes()).unwrap().unwrap().library.id
            })
        })
        .collect::<Vec<_>>();
    let ids = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec!["pkg-0@1.0.0", "pkg-1@1.0.1", "pkg-2@1.0.2", "pkg-3@1.0.3"]
    );
}

#[test]
fn null_constraints_default_to_empty() -> Result<()> {
    let pkg = parse_str(r#"{"name":"a","dependencies":{"x":null}}"#)?.unwrap();
    assert_eq!(pkg.dependencies, deps(&[("x", "")]));

    let pkg = parse_str(r#"{"name":"a","optionalDependencies":{"x":null}}"#)?.unwrap();
    assert_eq!(pkg.optional_dependencies, deps(&[("x", "")]));

    let pkg = parse_str(r#"{"dependencies":{"x":null}}"#)?.unwrap();
    assert_eq!(pkg.library.name, "no-package-name");
    Ok(())
}

#[test]
fn repeated_keys_keep_last_value() -> Result<()> {
    let pkg = parse_str(r#"{"name":"a","name":"b"}"#)?.unwrap();
    assert_eq!(pkg.library.name, "b");
    assert_eq!(pkg.library.id, package_id("b", ""));

    let pkg = parse_str(
        r#"{"name":"c","license":"MIT","license":{"type":"ISC"},"dependencies":{"x":"1"},"dependencies":{"y":"2"}}"#,
    )?
    .unwrap();
    assert_eq!(pkg.library.license, "ISC");
    assert_eq!(pkg.dependencies, deps(&[("y", "2")]));

    assert_eq!(parse_str(r#"{"name":"a","name":""}"#)?, None);
    Ok(())
}

mod common;

use markgen_core::AnyEmptyResult;
use similar_asserts::assert_eq;

#[test]
fn list_prints_tokens() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("list")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("Tokens:"))
		.stdout(predicates::str::contains("1  Referencer  (line 1)"))
		.stdout(predicates::str::contains("2  <T>  (line 1)"))
		.stdout(predicates::str::contains("3  T  (line 2)"))
		.stdout(predicates::str::contains("3 token(s)"));

	Ok(())
}

#[test]
fn list_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	let output = common::markgen_cmd()
		.arg("list")
		.arg(&input)
		.args(["--format", "json"])
		.output()?;
	assert!(output.status.success());

	let tokens: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(
		tokens,
		serde_json::json!([
			{ "id": 1, "text": "Referencer", "line": 1 },
			{ "id": 2, "text": "<T>", "line": 1 },
			{ "id": 3, "text": "T", "line": 2 },
		])
	);

	Ok(())
}

#[test]
fn list_without_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Plain.java");
	std::fs::write(&input, "class Plain {}\n")?;

	common::markgen_cmd()
		.arg("list")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("No markers found."));

	Ok(())
}

#[test]
fn list_discovers_dot_config_pattern() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/markgen.toml"),
		"[pattern]\nprefix = \"<<\"\nsuffix = \">>\"\n",
	)?;
	let input = tmp.path().join("angles.txt");
	std::fs::write(&input, "a <<7>>b /*__1__*/c\n")?;

	common::markgen_cmd()
		.arg("list")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("7  b  (line 1)"))
		.stdout(predicates::str::contains("1 token(s)"));

	Ok(())
}

#[test]
fn list_rejects_invalid_pattern() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("markgen.toml"),
		"[pattern]\nprefix = \"/* \"\n",
	)?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("list")
		.arg(&input)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("markgen::invalid_pattern_character"));

	Ok(())
}

#[test]
fn missing_subcommand_fails() {
	common::markgen_cmd().assert().code(1);
}

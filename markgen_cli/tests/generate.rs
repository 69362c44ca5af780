mod common;

use markgen_core::AnyEmptyResult;
use markgen_core::DEFAULT_NOTE;
use similar_asserts::assert_eq;

const GENERATED: &str = "public class IntReferencer  {\n\tprivate Integer value;\n\n\tpublic \
                         IntReferencer(Integer value) {\n\t\tthis.value = value;\n\t}\n}\n";

#[test]
fn generate_prints_to_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--replace", "1", "IntReferencer"])
		.args(["--remove", "2"])
		.args(["--replace", "3", "Integer"])
		.assert()
		.success()
		.stdout(format!("{DEFAULT_NOTE}\n{GENERATED}"));

	Ok(())
}

#[test]
fn generate_writes_output_with_extension() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.arg("--output")
		.arg(tmp.path().join("IntReferencer"))
		.args(["--extension", ".java"])
		.args(["--license", "// MIT"])
		.args(["--remove", "2", "--replace", "1", "IntReferencer"])
		.args(["--replace", "3", "Integer"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Generated"))
		.stdout(predicates::str::contains("3 edit(s) applied"));

	let content = std::fs::read_to_string(tmp.path().join("IntReferencer.java"))?;
	assert_eq!(content, format!("// MIT\n{DEFAULT_NOTE}\n{GENERATED}"));

	Ok(())
}

#[test]
fn generate_applies_config_edits_first() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;
	std::fs::write(
		tmp.path().join("markgen.toml"),
		"[output]\nnote = \"\"\n\n[[edits]]\nop = \"remove\"\nid = 2\n\n[[edits]]\nop = \
		 \"replace\"\nid = 1\ntext = \"IntReferencer\"\n",
	)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--replace", "3", "Integer"])
		.assert()
		.success()
		.stdout(GENERATED);

	Ok(())
}

#[test]
fn generate_uses_explicit_config_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	let config = tmp.path().join("variants.toml");
	std::fs::write(&input, common::REFERENCER)?;
	std::fs::write(
		&config,
		"[output]\nnote = \"// variant\"\n\n[[edits]]\nop = \"remove\"\nid = 2\n",
	)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicates::str::starts_with("// variant\npublic class Referencer  {"));

	Ok(())
}

#[test]
fn generate_keeps_command_line_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--append", "1", "!", "--replace", "1", "Foo"])
		.assert()
		.success()
		.stdout(predicates::str::contains("public class Foo! <T> {"))
		.stdout(predicates::str::contains("public Foo!(T value) {"));

	Ok(())
}

#[test]
fn generate_after_global_flags_reports_edits() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("--verbose")
		.arg("generate")
		.arg(&input)
		.args(["--note", "", "--remove", "2"])
		.assert()
		.success()
		.stdout(predicates::str::starts_with("public class Referencer  {"))
		.stderr(predicates::str::contains("remove 2 (1 occurrence(s))"));

	Ok(())
}

#[test]
fn generate_inserts_inside_token() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--insert", "1", "3", "_"])
		.assert()
		.success()
		.stdout(predicates::str::contains("public class Ref_erencer <T> {"))
		.stdout(predicates::str::contains("public Ref_erencer(T value) {"));

	Ok(())
}

#[test]
fn generate_keep_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.arg("--keep-markers")
		.args(["--replace", "1", "IntReferencer"])
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"public class /*__1__*/IntReferencer /*__2__*/<T> {",
		));

	Ok(())
}

#[test]
fn generate_with_custom_pattern() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("counter.rs");
	std::fs::write(&input, "let {{1}}count = 0;\n")?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--prefix", "{{", "--suffix", "}}"])
		.args(["--note", ""])
		.args(["--replace", "1", "total"])
		.assert()
		.success()
		.stdout("let total = 0;\n");

	Ok(())
}

#[test]
fn generate_diff_shows_changes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.arg("--diff")
		.args(["--remove", "2"])
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"-public class /*__1__*/Referencer /*__2__*/<T> {",
		))
		.stdout(predicates::str::contains("+public class Referencer  {"))
		.stdout(predicates::str::contains(" }"));

	Ok(())
}

#[test]
fn generate_unknown_id_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--replace", "1", "IntReferencer", "--remove", "42"])
		.assert()
		.code(2)
		.stdout("")
		.stderr(predicates::str::contains("markgen::unknown_id"));

	Ok(())
}

#[test]
fn generate_malformed_id_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Referencer.java");
	std::fs::write(&input, common::REFERENCER)?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.args(["--remove", "-3"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("markgen::malformed_id"));

	Ok(())
}

#[test]
fn generate_duplicate_id_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("Twice.java");
	std::fs::write(&input, "int /*__1__*/a;\nint /*__1__*/b;\n")?;

	common::markgen_cmd()
		.arg("generate")
		.arg(&input)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("markgen::duplicate_id"));

	Ok(())
}

#[test]
fn generate_missing_input_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::markgen_cmd()
		.arg("generate")
		.arg(tmp.path().join("Missing.java"))
		.assert()
		.code(2);

	Ok(())
}

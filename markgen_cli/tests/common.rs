use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const REFERENCER: &str = "public class /*__1__*/Referencer /*__2__*/<T> {\n\tprivate \
                              /*__3__*/T value;\n\n\tpublic Referencer(T value) \
                              {\n\t\tthis.value = value;\n\t}\n}\n";

pub fn markgen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("markgen"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

use std::error::Error;
use std::path::{Path, PathBuf};

use reinstall::command::{CommandSpec, generate_command};
use reinstall::config::{ArgList, ExtraArgs, ReinstallConfig};
use reinstall_test_utils::builders::ConfigBuilder;
use reinstall_test_utils::fixture;
use toml::Value;

type TestResult = Result<(), Box<dyn Error>>;

fn generate(file: &str, cfg: &ReinstallConfig) -> CommandSpec {
    generate_command(&fixture(file), cfg).expect("expected a command")
}

fn table(src: &str) -> toml::Table {
    toml::from_str(src).expect("valid TOML table")
}

#[test]
fn package_json_runs_npm_install() {
    let spec = generate("package.json", &ReinstallConfig::default());

    assert_eq!(spec.program, "npm");
    assert_eq!(spec.args, vec!["install"]);
    assert_eq!(spec.working_dir, PathBuf::from("/project/fixtures"));
}

#[test]
fn production_adds_flag_to_npm() {
    let cfg = ConfigBuilder::new().production(true).build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.args, vec!["install", "--production"]);
}

#[test]
fn ignore_scripts_adds_flag_to_npm() {
    let cfg = ConfigBuilder::new().ignore_scripts(true).build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.args, vec!["install", "--ignore-scripts"]);
}

#[test]
fn no_optional_adds_flag_to_npm() {
    let cfg = ConfigBuilder::new().no_optional(true).build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.args, vec!["install", "--no-optional"]);
}

#[test]
fn bower_json_runs_non_interactive_bower_install() {
    let spec = generate("bower.json", &ReinstallConfig::default());
    assert_eq!(spec.program, "bower");
    assert_eq!(spec.args, vec!["install", "--config.interactive=false"]);
}

#[test]
fn production_adds_flag_to_bower_after_base_args() {
    let cfg = ConfigBuilder::new().production(true).build();
    let spec = generate("bower.json", &cfg);
    assert_eq!(
        spec.args,
        vec!["install", "--config.interactive=false", "--production"]
    );
}

#[test]
fn allow_root_adds_flag_to_bower() {
    let cfg = ConfigBuilder::new().allow_root(true).build();
    let spec = generate("bower.json", &cfg);
    assert_eq!(
        spec.args,
        vec!["install", "--config.interactive=false", "--allow-root"]
    );
}

#[test]
fn npm_only_flags_do_not_touch_other_commands() {
    let cfg = ConfigBuilder::new()
        .ignore_scripts(true)
        .no_optional(true)
        .allow_root(true)
        .production(true)
        .build();

    assert_eq!(generate("composer.json", &cfg).args, vec!["install"]);
    assert_eq!(
        generate("requirements.txt", &cfg).args,
        vec!["install", "-r", "requirements.txt"]
    );
    assert_eq!(
        generate("bower.json", &cfg).args,
        vec![
            "install",
            "--config.interactive=false",
            "--production",
            "--allow-root"
        ]
    );
}

#[test]
fn built_in_manifests_map_to_their_commands() {
    let cfg = ReinstallConfig::default();

    let tsd = generate("tsd.json", &cfg);
    assert_eq!(tsd.program, "tsd");
    assert_eq!(tsd.args, vec!["reinstall", "--save"]);

    let pip = generate("requirements.txt", &cfg);
    assert_eq!(pip.program, "pip");
    assert_eq!(pip.args, vec!["install", "-r", "requirements.txt"]);

    let composer = generate("composer.json", &cfg);
    assert_eq!(composer.program, "composer");
    assert_eq!(composer.args, vec!["install"]);

    let typings = generate("typings.json", &cfg);
    assert_eq!(typings.program, "typings");
    assert_eq!(typings.args, vec!["install"]);
}

#[test]
fn global_args_list_is_appended() {
    let cfg = ConfigBuilder::new()
        .args(vec!["--dev", "--no-shrinkwrap"])
        .build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.args, vec!["install", "--dev", "--no-shrinkwrap"]);
}

#[test]
fn global_args_single_string_is_appended() {
    let cfg = ConfigBuilder::new().args("--dev").build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.args, vec!["install", "--dev"]);
}

#[test]
fn global_args_apply_to_every_command() {
    let cfg = ConfigBuilder::new().args("--verbose").build();
    assert_eq!(generate("composer.json", &cfg).args, vec!["install", "--verbose"]);
    assert_eq!(
        generate("tsd.json", &cfg).args,
        vec!["reinstall", "--save", "--verbose"]
    );
}

#[test]
fn per_command_lists_are_appended_to_their_own_command() {
    let cfg = ConfigBuilder::new()
        .extra("bower", vec!["--allow-root"])
        .extra("npm", vec!["--silent"])
        .build();

    assert_eq!(generate("package.json", &cfg).args, vec!["install", "--silent"]);
    assert_eq!(
        generate("bower.json", &cfg).args,
        vec!["install", "--config.interactive=false", "--allow-root"]
    );
}

#[test]
fn per_command_tables_are_flattened_to_flags() {
    let cfg = ConfigBuilder::new()
        .extra("bower", table("allowRoot = true\nsilent = true"))
        .extra("npm", table("registry = \"https://my.own-registry.com\""))
        .build();

    assert_eq!(
        generate("package.json", &cfg).args,
        vec!["install", "--registry=https://my.own-registry.com"]
    );
    assert_eq!(
        generate("bower.json", &cfg).args,
        vec![
            "install",
            "--config.interactive=false",
            "--allow-root",
            "--silent"
        ]
    );
}

#[test]
fn per_command_single_string_is_one_argument() {
    let cfg = ConfigBuilder::new()
        .extra("bower", "--silent")
        .extra("npm", "--registry=https://my.own-registry.com")
        .build();

    assert_eq!(
        generate("package.json", &cfg).args,
        vec!["install", "--registry=https://my.own-registry.com"]
    );
    assert_eq!(
        generate("bower.json", &cfg).args,
        vec!["install", "--config.interactive=false", "--silent"]
    );
}

#[test]
fn command_overrides_map_any_file_to_any_command() {
    let cfg = ConfigBuilder::new()
        .command("package.json", "yarn")
        .command("config.js", "jspm")
        .command("blaha.yml", "blaha")
        .extra("jspm", "install")
        .extra("blaha", vec!["one", "two", "--three"])
        .build();

    let yarn = generate("package.json", &cfg);
    assert_eq!(yarn.program, "yarn");
    assert!(yarn.args.is_empty());

    let jspm = generate("config.js", &cfg);
    assert_eq!(jspm.program, "jspm");
    assert_eq!(jspm.args, vec!["install"]);

    let blaha = generate("blaha.yml", &cfg);
    assert_eq!(blaha.program, "blaha");
    assert_eq!(blaha.args, vec!["one", "two", "--three"]);
}

#[test]
fn overriding_one_file_keeps_the_other_defaults() {
    let cfg = ConfigBuilder::new().command("package.json", "yarn").build();
    assert_eq!(generate("bower.json", &cfg).program, "bower");
    assert_eq!(generate("package.json", &cfg).program, "yarn");
}

#[test]
fn npm_argument_precedence_is_fixed() {
    let cfg = ConfigBuilder::new()
        .production(true)
        .ignore_scripts(true)
        .no_optional(true)
        .args(vec!["--global-a", "--global-b"])
        .extra("npm", vec!["--silent"])
        .build();

    assert_eq!(
        generate("package.json", &cfg).args,
        vec![
            "install",
            "--production",
            "--ignore-scripts",
            "--global-a",
            "--global-b",
            "--silent",
            "--no-optional"
        ]
    );
}

#[test]
fn bower_argument_precedence_is_fixed() {
    let cfg = ConfigBuilder::new()
        .production(true)
        .allow_root(true)
        .args("--global")
        .extra("bower", table("silent = true"))
        .build();

    assert_eq!(
        generate("bower.json", &cfg).args,
        vec![
            "install",
            "--config.interactive=false",
            "--production",
            "--global",
            "--silent",
            "--allow-root"
        ]
    );
}

#[test]
fn non_string_values_are_stringified() {
    let cfg = ConfigBuilder::new()
        .args(ArgList::Many(vec![
            Value::Integer(5),
            Value::Boolean(true),
            Value::Float(1.5),
        ]))
        .extra("pip", ExtraArgs::Single(Value::Integer(3)))
        .build();

    assert_eq!(
        generate("requirements.txt", &cfg).args,
        vec!["install", "-r", "requirements.txt", "5", "true", "1.5", "3"]
    );
}

#[test]
fn unsupported_file_produces_no_command() {
    let cfg = ReinstallConfig::default();
    assert!(generate_command(&fixture("README.md"), &cfg).is_none());
    assert!(generate_command(&fixture("Package.json"), &cfg).is_none());
    assert!(generate_command(&fixture("nested/package.json.bak"), &cfg).is_none());
}

#[test]
fn path_without_file_name_produces_no_command() {
    let cfg = ReinstallConfig::default();
    assert!(generate_command(Path::new("/"), &cfg).is_none());
    assert!(generate_command(Path::new(".."), &cfg).is_none());
}

#[test]
fn working_dir_is_manifest_directory() {
    let cfg = ReinstallConfig::default();

    let nested = generate_command(Path::new("/work/app/web/package.json"), &cfg)
        .expect("package.json is supported");
    assert_eq!(nested.working_dir, PathBuf::from("/work/app/web"));

    let relative = generate_command(Path::new("sub/bower.json"), &cfg)
        .expect("bower.json is supported");
    assert_eq!(relative.working_dir, PathBuf::from("sub"));

    let bare = generate_command(Path::new("package.json"), &cfg)
        .expect("package.json is supported");
    assert_eq!(bare.working_dir, PathBuf::from("."));
}

#[test]
fn generating_twice_gives_identical_commands() -> TestResult {
    let cfg = ConfigBuilder::new()
        .production(true)
        .args(vec!["--a"])
        .extra("npm", table("registry = \"r\"\nsaveExact = true"))
        .build();

    let first = generate_command(&fixture("package.json"), &cfg).ok_or("no command")?;
    let second = generate_command(&fixture("package.json"), &cfg).ok_or("no command")?;
    assert_eq!(first, second);

    // The shared defaults were not mutated by the first call.
    let plain = generate("package.json", &ReinstallConfig::default());
    assert_eq!(plain.args, vec!["install"]);

    Ok(())
}

#[test]
fn display_joins_program_and_args() {
    let cfg = ConfigBuilder::new().production(true).build();
    let spec = generate("package.json", &cfg);
    assert_eq!(spec.to_string(), "npm install --production");
}

#[test]
fn falsy_extra_arguments_add_nothing() -> TestResult {
    for snippet in ["npm = false", "npm = \"\"", "npm = 0", "npm = 0.0"] {
        let cfg: ReinstallConfig = toml::from_str(snippet)?;
        assert_eq!(
            generate("package.json", &cfg).args,
            vec!["install"],
            "{snippet}"
        );
    }
    Ok(())
}

#[test]
fn falsy_global_args_add_nothing() -> TestResult {
    for snippet in ["args = false", "args = \"\"", "args = 0"] {
        let cfg: ReinstallConfig = toml::from_str(snippet)?;
        assert_eq!(
            generate("package.json", &cfg).args,
            vec!["install"],
            "{snippet}"
        );
    }
    Ok(())
}

#[test]
fn falsy_values_inside_lists_are_still_passed() -> TestResult {
    let cfg: ReinstallConfig = toml::from_str("args = [0]\nnpm = [false, \"\"]")?;
    assert_eq!(
        generate("package.json", &cfg).args,
        vec!["install", "0", "false", ""]
    );
    Ok(())
}

#[test]
fn switched_off_extra_keeps_option_flags() -> TestResult {
    let cfg: ReinstallConfig =
        toml::from_str("production = true\nno_optional = true\nnpm = false")?;
    assert_eq!(
        generate("package.json", &cfg).args,
        vec!["install", "--production", "--no-optional"]
    );
    Ok(())
}

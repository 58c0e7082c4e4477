use std::fs;
use std::path::Path;

use mono_dump::{BatchOptions, Indent, KeyStyle, LabelLookup, LabelTable, WriteOptions};
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write test file");
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("valid json")
}

const LABELS: &str = "\t[0]\n\t\tstring _Id = \"ENEMY_1\"\n\t\tstring _Text = \"Slime\"\n\
\t[1]\n\t\tstring _Id = \"GROUP_1\"\n\t\tstring _Text = \"Might\"";

fn seed(source: &Path) {
    write_file(&source.join("TextLabel.mono"), LABELS);
    write_file(
        &source.join("EnemyParam.mono"),
        "\t[0]\n\t\tint _Id = 1\n\t\tstring _Name = \"ENEMY_1\"",
    );
    write_file(
        &source.join("AbilityGroup.mono"),
        "\t[0]\n\t\tint _Id = 10\n\t\tstring _Name = \"GROUP_1\"",
    );
    write_file(&source.join("notes.txt"), "int _Id = 1");
    write_file(
        &source.join("nested/Other.mono"),
        "\t[0]\n\t\tstring _Name = \"ENEMY_1\"",
    );
}

#[test]
fn converts_a_directory_tree() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("extract");
    let destination = dir.path().join("out");
    seed(&source);

    let report = mono_dump::convert_dir(&source, &destination, &BatchOptions::default()).unwrap();

    assert_eq!(report.label_files, vec![source.join("TextLabel.mono")]);
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.written[0], destination.join("TextLabel.json"));

    assert_eq!(
        read_json(&destination.join("TextLabel.json")),
        json!({"ENEMY_1": "Slime", "GROUP_1": "Might"})
    );
    assert_eq!(
        read_json(&destination.join("EnemyParam.json")),
        json!({"0": {"_Id": 1, "_Name": "Slime"}})
    );
    assert_eq!(
        read_json(&destination.join("AbilityGroup.json")),
        json!({"10": "Might"})
    );
    assert!(!destination.join("notes.json").exists());
}

#[test]
fn label_tables_do_not_leak_into_other_directories() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("extract");
    let destination = dir.path().join("out");
    seed(&source);

    mono_dump::convert_dir(&source, &destination, &BatchOptions::default()).unwrap();

    assert_eq!(
        read_json(&destination.join("Other.json")),
        json!({"0": {"_Name": "ENEMY_1"}})
    );
}

#[test]
fn pair_file_list_and_write_options_are_configurable() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("extract");
    let destination = dir.path().join("out");
    seed(&source);

    let options = BatchOptions::new()
        .with_pair_files(["EnemyParam"])
        .with_write_options(
            WriteOptions::new()
                .with_indent(Indent::Spaces(0))
                .with_key_style(KeyStyle::TrimUnderscore),
        );
    mono_dump::convert_dir(&source, &destination, &options).unwrap();

    let enemy = fs::read_to_string(destination.join("EnemyParam.json")).unwrap();
    assert_eq!(enemy, "{\"1\":\"Slime\"}");
    let ability = fs::read_to_string(destination.join("AbilityGroup.json")).unwrap();
    assert_eq!(ability, "{\"0\":{\"Id\":10,\"Name\":\"Might\"}}");
}

#[test]
fn parse_errors_name_the_file() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("extract");
    write_file(&source.join("Broken.mono"), "[0]\nint _Id = one");

    let err = mono_dump::convert_dir(&source, &dir.path().join("out"), &BatchOptions::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Broken.mono"), "{message}");
    assert!(message.contains("line 2"), "{message}");
}

#[test]
fn converts_a_single_file_with_labels() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("Skill.mono");
    write_file(&input, "[3]\nstring _Name = \"SKILL_3\"\nUInt8 _Passive = 0");
    let labels: LabelTable = [("SKILL_3", "Fireball")].into_iter().collect();

    let destination = dir.path().join("out");

    let target = mono_dump::convert_file(
        &input,
        &destination,
        Some(&labels as &dyn LabelLookup),
        &WriteOptions::default(),
    )
    .unwrap();
    assert_eq!(target, destination.join("Skill.json"));
    assert_eq!(
        read_json(&target),
        json!({"3": {"_Name": "Fireball", "_Passive": 0}})
    );
}

#[test]
fn reads_label_files() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("TextLabel.mono");
    write_file(&path, LABELS);
    let table = mono_dump::read_label_file(&path).unwrap();
    assert_eq!(table.get("GROUP_1"), Some("Might"));
}

#[test]
fn label_dumps_of_one_directory_are_merged() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("extract");
    let destination = dir.path().join("out");
    write_file(&source.join("TextLabel.mono"), LABELS);
    write_file(
        &source.join("TextLabelExtra.mono"),
        "string _Id = \"GROUP_1\"\nstring _Text = \"Valor\"",
    );
    write_file(
        &source.join("EnemyParam.mono"),
        "\t[0]\n\t\tstring _Name = \"ENEMY_1\"\n\t\tstring _Group = \"GROUP_1\"",
    );

    let report = mono_dump::convert_dir(&source, &destination, &BatchOptions::default()).unwrap();

    assert_eq!(report.label_files.len(), 2);
    assert_eq!(
        read_json(&destination.join("EnemyParam.json")),
        json!({"0": {"_Name": "Slime", "_Group": "Valor"}})
    );
}

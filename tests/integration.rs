use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_gidoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn gtk() -> assert_cmd::Command {
    let mut c = cmd();
    c.args(["-s", &fixture_path("store")])
        .args(["-l", &fixture_path("live/Gtk.json")])
        .arg("Gtk-3.0");
    c
}

fn stdout_of(c: &mut assert_cmd::Command) -> String {
    let assert = c.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- python stubs --

#[test]
fn imports_cover_dependencies() {
    let output = stdout_of(&mut gtk());
    assert!(output.starts_with("# Documentation stubs for Gtk 3.0\n"));
    for ns in ["GObject", "Gdk", "Gtk"] {
        assert!(
            output.contains(&format!("from gi.repository import {}\n", ns)),
            "missing import of {}",
            ns
        );
    }
}

#[test]
fn class_docs_prefer_root_types() {
    let output = stdout_of(&mut gtk());
    assert!(output.contains("class Button(object):"));
    assert!(output.contains(
        "A ``Gtk.Button`` emits :ref:`Gtk.Button.signals.clicked` when pressed.\n\n.. versionadded:: 2.0\n"
    ));
    assert!(!output.contains("Gdk.NotAButton"));
    assert!(output.contains("    __init__ = Gtk.Button.__init__\n"));
}

#[test]
fn bases_flag_lists_merged_bases() {
    let output = stdout_of(gtk().arg("--bases"));
    assert!(output.contains("class Button(Bin, Atk.ImplementorIface):"));
}

#[test]
fn methods_resolve_signatures() {
    let output = stdout_of(&mut gtk());
    assert!(output.contains(
        "    set_label = Gtk.Button.set_label\n    r'''\n:param label: a string\n:type label: :obj:`str`\n\n\
         Sets the text of the label of the button to ``label``.\n'''\n"
    ));
    // signature borrowed from Gtk.Bin
    assert!(output.contains(
        ":returns: The text of the label widget, or :obj:`None`.\n:rtype: :obj:`str`\n\n\
         Fetches the text from the label of the button."
    ));
    assert!(output.contains("    new_with_label = staticmethod(Gtk.Button.new_with_label)\n"));
}

#[test]
fn module_functions_get_doc_attribute() {
    let output = stdout_of(&mut gtk());
    assert!(output.contains(
        "main = Gtk.main\nmain.__doc__ = r'''\n\nRuns the main loop until :func:`Gtk.main_quit` is called.\n'''\n"
    ));
    assert!(output.contains(
        "main_quit = Gtk.main_quit\nmain_quit.__doc__ = r'''\nMakes the innermost invocation of the main loop return.\n'''\n"
    ));
}

#[test]
fn constants_and_enums() {
    let output = stdout_of(&mut gtk());
    assert!(output.contains("MAJOR_VERSION = Gtk.MAJOR_VERSION\n"));
    assert!(output.contains(".. image:: ../_static/stock/gtk-ok.png"));
    assert!(!output.contains("3D_VIEW"));

    let fill = output.find("    FILL = 0\n").expect("FILL emitted");
    let start = output.find("    START = 1\n").expect("START emitted");
    let shadow = output.find("    _BASELINE = 3\n").expect("shadow emitted");
    let rebind = output
        .find("setattr(Align, 'BASELINE', Align._BASELINE)\n")
        .expect("rebind emitted");
    assert!(fill < start && start < shadow && shadow < rebind);
    assert!(!output.contains("    BASELINE = 4"));
    assert!(output.contains("class Align(GObject.GEnum):"));
    assert!(output.contains("    START = 1\n    r'''\nsnap to left or top side\n'''\n"));
}

// -- json --

#[test]
fn json_includes_class_tables() {
    let output = stdout_of(gtk().args(["-f", "json"]));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["namespace"], "Gtk");
    let button = &value["classes"][0];
    assert_eq!(button["name"], "Gtk.Button");

    let props = button["properties"].as_array().unwrap();
    assert_eq!(props.len(), 1, "inherited properties are left out");
    assert_eq!(props[0]["name"], "label");
    assert_eq!(props[0]["construct"], true);
    assert_eq!(props[0]["short_desc"], "Label text");
    assert_eq!(props[0]["desc"], "Text of the label widget inside the button.");

    let signal = &button["signals"][0];
    assert_eq!(signal["name"], "clicked");
    assert_eq!(signal["ret"], ":obj:`None`");
    assert_eq!(signal["short_desc"], "Emitted when the button has been activated.");
}

// -- output directory --

#[test]
fn output_dir_gets_namespace_file() {
    let dir = TempDir::new().unwrap();
    gtk()
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output = std::fs::read_to_string(dir.path().join("Gtk.py")).unwrap();
    assert!(output.contains("class Button(object):"));
}

#[test]
fn json_output_extension() {
    let dir = TempDir::new().unwrap();
    gtk()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "json"])
        .assert()
        .success();
    assert!(dir.path().join("Gtk.json").exists());
}

// -- errors --

#[test]
fn unknown_namespace_lists_available() {
    cmd()
        .args(["-s", &fixture_path("store")])
        .args(["-l", &fixture_path("live/Gtk.json")])
        .arg("Pango-1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("available: GObject-2.0, Gdk-3.0, Gtk-3.0"));
}

#[test]
fn invalid_format_fails() {
    gtk()
        .args(["-f", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn malformed_namespace_key_fails() {
    cmd()
        .args(["-s", &fixture_path("store")])
        .args(["-l", &fixture_path("live/Gtk.json")])
        .arg("Gtk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected <Name>-<version>"));
}

#[test]
fn missing_live_dump_fails() {
    cmd()
        .args(["-s", &fixture_path("store")])
        .args(["-l", &fixture_path("live/Nope.json")])
        .arg("Gtk-3.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read live dump"));
}

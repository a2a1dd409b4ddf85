#[test]
fn ts64_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/ts64_error_pass.rs");
    t.pass("tests/ui/ts64_error_context.rs");
}

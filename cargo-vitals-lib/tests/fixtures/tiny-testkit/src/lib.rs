pub fn check(condition: bool) {
    assert!(condition, "{} check failed", tiny_leaf::NAME);
}

use super::*;

#[test]
fn test_find_by_name_and_alias() {
    assert_eq!(find_command("roll").unwrap().kind, CommandKind::Roll);
    assert_eq!(find_command("dice").unwrap().kind, CommandKind::Roll);
    assert_eq!(find_command("TWEYEN").unwrap().kind, CommandKind::Fact);
    assert_eq!(find_command("regex").unwrap().kind, CommandKind::TestRegex);
    assert_eq!(find_command("time").unwrap().kind, CommandKind::Time);
    assert_eq!(find_command("credits").unwrap().kind, CommandKind::Info);
    assert!(find_command("page").is_none());
}

#[test]
fn test_names_and_aliases_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for command in COMMANDS {
        for name in std::iter::once(command.name).chain(command.aliases.iter().copied()) {
            assert!(seen.insert(name), "{} registered twice", name);
        }
    }
}

#[test]
fn test_owner_only_commands() {
    let owner_only: Vec<&str> = COMMANDS
        .iter()
        .filter(|c| c.owner_only)
        .map(|c| c.name)
        .collect();
    assert_eq!(owner_only, vec!["addalias", "rmalias", "testregex"]);
}

#[test]
fn test_suggest_close_typo() {
    assert_eq!(suggest_command("sparkcalk"), Some("sparkcalc"));
    assert_eq!(suggest_command("rol"), None);
    assert_eq!(suggest_command("weather"), None);
}

#[test]
fn test_suggest_skips_owner_commands() {
    assert_eq!(suggest_command("addaliass"), None);
}

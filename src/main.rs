use {
    crossterm::terminal,
    keyline::{
        basic_completion, get_keyspec_modifiers, get_named_keys, CompletionEntry, CrosstermSource,
        DefaultKeyMap, EditResult, HighlightRules, KeyMap, KeySource, Keyline, KeylineError,
    },
    nu_ansi_term::{Color, Style},
    regex::Regex,
    std::io::{stdout, Write},
};

fn main() -> Result<(), KeylineError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    // if --keys is passed, show the decoded key presses
    if args.len() > 1 && args[1] == "--keys" {
        println!("Ready to print key presses (Abort with Ctrl-D):");
        print_keys()?;
        println!();
        return Ok(());
    }
    if args.len() > 1 && args[1] == "--list" {
        list_stuff();
        return Ok(());
    }

    let yes_no = KeyMap::new().with_binding(Regex::new("(?i)[yn]")?, |ctx| {
        EditResult::line(ctx.key.sequence.to_lowercase()).end_input()
    });
    let answer = Keyline::create()
        .with_keymap(yes_no)
        .with_prefix("Do you want to try keyline? [y/n] ")
        .read_line()?;
    println!();
    if answer != "y" {
        return Ok(());
    }

    let entries: Vec<CompletionEntry> = vec!["hello".into(), "hell".into(), ("Im", "I'm").into()];
    let greeting = Keyline::create()
        .with_keymap(
            DefaultKeyMap::new(1)
                .with_completion(basic_completion(entries, false, true))
                .build(),
        )
        .with_prefix(Color::Green.bold().paint("say something (tab completes): ").to_string())
        .read_line()?;
    println!("\nWe processed: {greeting}");

    let highlighter = HighlightRules::new()
        .with_rule(["{", "}"], [Style::new().bold(), Style::new().dimmed()])
        .with_rule(Regex::new(r"\b(I|you|we)\b")?, Color::Yellow.normal())
        .build();
    println!("Write up to five lines, finish with Ctrl-D:");
    let text = Keyline::create()
        .with_keymap(DefaultKeyMap::new(5).build())
        .with_highlighter(Box::new(highlighter))
        .with_prefix(Color::DarkGray.paint("| ").to_string())
        .read_line()?;
    println!("We processed {} lines:\n{text}", text.lines().count());

    Ok(())
}

/// **For debugging purposes only:** Print the key presses as the engine sees them.
fn print_keys() -> Result<(), KeylineError> {
    stdout().flush()?;
    terminal::enable_raw_mode()?;
    let result = print_keys_helper();
    terminal::disable_raw_mode()?;

    result
}

fn print_keys_helper() -> Result<(), KeylineError> {
    let mut source = CrosstermSource;
    loop {
        for key in source.read_keys()? {
            println!(
                "key: {:?}; sequence: {:?}; ctrl: {}; meta: {}; shift: {}\r",
                key.key, key.sequence, key.ctrl, key.meta, key.shift
            );
            if key.ctrl && key.key.as_deref() == Some("d") {
                return Ok(());
            }
        }
    }
}

fn list_stuff() {
    println!("Named keys:");
    for key in get_named_keys() {
        println!("  {key}");
    }
    println!("Modifiers:");
    for modifier in get_keyspec_modifiers() {
        println!("  {modifier}");
    }
}

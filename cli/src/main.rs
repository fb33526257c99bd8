//! rure CLI: driving adapter for the rure regex adapter.
//!
//! Subcommands:
//! - `search <pattern> <text> [options]`: first match, as JSON
//! - `match <pattern> <text> [options]`: first match anchored at `--pos`
//! - `findall <pattern> <text> [options]`: every match, as a JSON array
//! - `check <pattern> [options]`: validate that the pattern compiles
//! - `names <pattern> [options]`: print the capture group table
//!
//! Options: `--flags imsxuUL`, `--submatches`, `--pos N`, `--endpos N`,
//! `--options <json>`.

use std::process;

use rure::prelude::*;
use serde_json::{json, Value};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "search" => cmd_find(Op::Search, &args[2..]),
        "match" => cmd_find(Op::Match, &args[2..]),
        "findall" => cmd_find(Op::Findall, &args[2..]),
        "check" => cmd_check(&args[2..]),
        "names" => cmd_names(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Search,
    Match,
    Findall,
}

fn cmd_find(op: Op, args: &[String]) -> Result<(), String> {
    let parsed = parse_args(args)?;
    let [pattern, text] = parsed.positional.as_slice() else {
        return Err("expected <pattern> <text>".into());
    };

    let re = compile(pattern, &parsed)?;
    let (pos, endpos) = (parsed.pos, parsed.endpos);
    let text = text.as_str();

    let found = match op {
        Op::Search => re.search(text, pos, endpos).map(|m| m.into_iter().collect()),
        Op::Match => re.match_at(text, pos, endpos).map(|m| m.into_iter().collect()),
        Op::Findall => re.findall(text, pos, endpos),
    }
    .map_err(|e| e.to_string())?;

    // Output spans are byte offsets.
    if let Some(diagnostic) = found.first().and_then(|m| m.offset_diagnostic("span")) {
        eprintln!("warning: {diagnostic}");
    }

    let mut rendered = found.iter().map(render).collect::<Result<Vec<_>, _>>()?;
    let output = match op {
        Op::Findall => Value::Array(rendered),
        Op::Search | Op::Match => rendered.pop().unwrap_or(Value::Null),
    };

    println!("{output}");
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let parsed = parse_args(args)?;
    let [pattern] = parsed.positional.as_slice() else {
        return Err("check requires a pattern".into());
    };

    let re = compile(pattern, &parsed)?;
    println!("Pattern valid ({} groups)", re.groups());
    Ok(())
}

fn cmd_names(args: &[String]) -> Result<(), String> {
    let parsed = parse_args(args)?;
    let [pattern] = parsed.positional.as_slice() else {
        return Err("names requires a pattern".into());
    };

    let re = compile(pattern, &parsed)?;
    for (i, name) in re.capture_names().iter().enumerate() {
        match name {
            Some(name) => println!("{i}\t{name}"),
            None => println!("{i}"),
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compilation and rendering
// ═══════════════════════════════════════════════════════════════════════════════

fn compile(pattern: &str, parsed: &Args) -> Result<Regex, String> {
    let mut options = match &parsed.options {
        Some(json) => Options::from_json(json).map_err(|e| e.to_string())?,
        None => Options::new(),
    };
    if parsed.submatches {
        options = options.submatches(true);
    }

    let re = Regex::with_options(pattern, parsed.flags, options).map_err(|e| e.to_string())?;
    for diagnostic in re.diagnostics() {
        eprintln!("warning: {diagnostic}");
    }
    Ok(re)
}

fn render(m: &Match<'_, '_>) -> Result<Value, String> {
    let whole = m.whole();
    let groups = m.groups(None).map_err(|e| e.to_string())?;
    let groupdict = m.groupdict(None).map_err(|e| e.to_string())?;

    Ok(json!({
        "span": [whole.start, whole.end],
        "match": m.group(0).map_err(|e| e.to_string())?,
        "groups": groups,
        "groupdict": groupdict,
        "lastindex": m.lastindex().map_err(|e| e.to_string())?,
        "lastgroup": m.lastgroup().map_err(|e| e.to_string())?,
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Args {
    positional: Vec<String>,
    flags: Flags,
    submatches: bool,
    pos: usize,
    endpos: Option<usize>,
    options: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--flags" => parsed.flags = parse_flags(value_of(args, &mut i)?)?,
            "--submatches" => parsed.submatches = true,
            "--pos" => parsed.pos = parse_index(value_of(args, &mut i)?)?,
            "--endpos" => parsed.endpos = Some(parse_index(value_of(args, &mut i)?)?),
            "--options" => parsed.options = Some(value_of(args, &mut i)?.to_owned()),
            other if other.starts_with("--") => {
                return Err(format!("unexpected argument \"{other}\""));
            }
            other => parsed.positional.push(other.to_owned()),
        }
        i += 1;
    }

    Ok(parsed)
}

fn value_of<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_flags(letters: &str) -> Result<Flags, String> {
    letters.chars().try_fold(Flags::empty(), |acc, c| {
        Flag::from_letter(c)
            .map(|f| acc | f.bit())
            .ok_or_else(|| format!("unknown flag letter '{c}'"))
    })
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.parse()
        .map_err(|e| format!("invalid index \"{s}\": {e}"))
}

fn print_usage() {
    eprintln!(
        "Usage: rure <command> [options]

Commands:
  search <pattern> <text>    Print the first match as JSON
  match <pattern> <text>     Print the match anchored at --pos as JSON
  findall <pattern> <text>   Print every match as a JSON array
  check <pattern>            Validate a pattern
  names <pattern>            Print capture group indices and names
  help                       Show this help

Options:
  --flags <letters>          i=IGNORECASE L=LOCALE m=MULTILINE s=DOTALL
                             u=UNICODE x=VERBOSE U=UNGREEDY
  --submatches               Compute group spans with every match
  --pos <n>                  Character index to start at
  --endpos <n>               Character index to stop at
  --options <json>           Options document, e.g. '{{\"size_limit\": 1048576}}'"
    );
}

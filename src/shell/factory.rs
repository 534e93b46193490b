use crate::shell::ast::{Builtin, Command, CommandKind};
use crate::shell::commands::{pipe, redirect, watch};
use crate::shell::context::ShellContext;
use crate::shell::parser::{normalize, split_args, trim};

/// Builds the command for a raw input line, or `None` for a blank line.
///
/// Operators are looked for on the alias-expanded text, so an alias may
/// introduce a pipe or a redirection the user never typed.
pub fn create_command(raw: &str, ctx: &ShellContext) -> Option<Command> {
    let line = normalize(raw, &ctx.aliases);
    if line.is_empty() {
        return None;
    }

    let rest = trim(&line.text[line.head.len()..]);
    let kind = match line.head.as_str() {
        "alias" => CommandKind::AliasDeclaration((!rest.is_empty()).then(|| rest.to_string())),
        "unalias" => CommandKind::AliasRemoval(split_args(rest)),
        head => redirect::parse(&line.text)
            .or_else(|| pipe::parse(&line.text))
            .unwrap_or_else(|| match head {
                "watch" => CommandKind::Watch(watch::parse(rest, ctx.watch_interval)),
                _ => Builtin::from_keyword(head)
                    .map(CommandKind::Builtin)
                    .unwrap_or(CommandKind::External),
            }),
    };

    Some(Command {
        original: trim(raw).to_string(),
        text: line.text,
        background: line.background,
        kind,
    })
}

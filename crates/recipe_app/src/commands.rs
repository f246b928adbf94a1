use recipe_core::{Msg, RecipeId};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search <text>     search recipes (at least 2 characters)
  type <text>       edit the search box; searches after a short pause
  clear             clear the search and go back to the cuisine
  cuisine <slug>    browse a cuisine (see `cuisines`)
  cuisines          list cuisines
  more              load the next page
  retry             retry after an error
  open <id>         show a recipe
  back              close the recipe
  fav               toggle favorite for the open recipe
  unfav <id>        remove a favorite
  favorites         list favorites
  feed              show the current list
  help              this text
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forwarded to the feed state.
    Dispatch(Msg),
    ShowFeed,
    ShowCuisines,
    ShowFavorites,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a recipe id")]
    InvalidId(String),
}

/// Parses one console line. Blank lines show the feed again.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" | "feed" | "ls" => Command::ShowFeed,
        "search" | "s" => Command::Dispatch(Msg::SearchSubmitted(required("search", rest)?)),
        "type" => Command::Dispatch(Msg::SearchInputChanged(rest.to_string())),
        "clear" => Command::Dispatch(Msg::SearchCleared),
        "cuisine" | "c" => Command::Dispatch(Msg::CategorySelected(
            required("cuisine", rest)?.to_ascii_lowercase(),
        )),
        "cuisines" => Command::ShowCuisines,
        "more" | "m" => Command::Dispatch(Msg::LoadMoreRequested),
        "retry" => Command::Dispatch(Msg::RetryRequested),
        "open" | "o" => Command::Dispatch(Msg::DetailRequested(recipe_id("open", rest)?)),
        "back" => Command::Dispatch(Msg::DetailClosed),
        "fav" => Command::Dispatch(Msg::DetailFavoriteToggled),
        "unfav" => Command::Dispatch(Msg::FavoriteRemoved(recipe_id("unfav", rest)?)),
        "favorites" | "favs" => Command::ShowFavorites,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(command)
}

fn required(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(rest.to_string())
}

fn recipe_id(command: &'static str, rest: &str) -> Result<RecipeId, CommandError> {
    let raw = required(command, rest)?;
    raw.parse().map_err(|_| CommandError::InvalidId(raw))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_feed_commands() {
        assert_eq!(
            parse("search  chicken curry "),
            Ok(Command::Dispatch(Msg::SearchSubmitted(
                "chicken curry".into()
            )))
        );
        assert_eq!(
            parse("cuisine Thai"),
            Ok(Command::Dispatch(Msg::CategorySelected("thai".into())))
        );
        assert_eq!(parse("MORE"), Ok(Command::Dispatch(Msg::LoadMoreRequested)));
        assert_eq!(parse("clear"), Ok(Command::Dispatch(Msg::SearchCleared)));
        assert_eq!(parse(""), Ok(Command::ShowFeed));
    }

    #[test]
    fn type_keeps_short_input() {
        assert_eq!(
            parse("type p"),
            Ok(Command::Dispatch(Msg::SearchInputChanged("p".into())))
        );
        assert_eq!(
            parse("type"),
            Ok(Command::Dispatch(Msg::SearchInputChanged(String::new())))
        );
    }

    #[test]
    fn parses_recipe_ids() {
        assert_eq!(
            parse("open 716429"),
            Ok(Command::Dispatch(Msg::DetailRequested(716429)))
        );
        assert_eq!(
            parse("unfav 3"),
            Ok(Command::Dispatch(Msg::FavoriteRemoved(3)))
        );
        assert_eq!(
            parse("open soup"),
            Err(CommandError::InvalidId("soup".into()))
        );
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!(parse("search"), Err(CommandError::MissingArgument("search")));
        assert_eq!(parse("bake 3"), Err(CommandError::Unknown("bake".into())));
        assert_eq!(parse("quit"), Ok(Command::Quit));
    }
}

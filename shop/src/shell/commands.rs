/// Line commands understood by the interactive shell
use crate::domain::value_objects::ProductId;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  products               list all products
  category <name>        list products in a category
  categories             list category names
  product <id>           show one product
  cart                   show the cart
  go <path>              navigate to a path (/, /products/<id>, /cart)
  add <id>               add one unit of a product to the cart
  remove <id>            remove a product from the cart
  qty <id> <n>           set a quantity (0 or less removes)
  clear                  empty the cart
  help                   show this help
  quit                   leave the shell";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type `help` for a list")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid {argument}: '{value}'")]
    InvalidArgument {
        argument: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Go(String),
    Products,
    Category(String),
    Categories,
    Product(ProductId),
    Cart,
    Add(ProductId),
    Remove(ProductId),
    Quantity(ProductId, i64),
    Clear,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "products" | "home" => Ok(ShellCommand::Products),
            "categories" => Ok(ShellCommand::Categories),
            "cart" => Ok(ShellCommand::Cart),
            "clear" => Ok(ShellCommand::Clear),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            "go" => required(rest, "go", "a path").map(|path| ShellCommand::Go(path.to_string())),
            "category" => required(rest, "category", "a category name")
                .map(|name| ShellCommand::Category(name.to_string())),
            "product" => product_id(rest, "product").map(ShellCommand::Product),
            "add" => product_id(rest, "add").map(ShellCommand::Add),
            "remove" | "rm" => product_id(rest, "remove").map(ShellCommand::Remove),
            "qty" => {
                let mut args = rest.split_whitespace();
                let id = product_id(args.next().unwrap_or(""), "qty")?;
                let raw = args.next().ok_or(CommandError::MissingArgument {
                    command: "qty",
                    argument: "a quantity",
                })?;
                let quantity = raw.parse::<i64>().map_err(|_| CommandError::InvalidArgument {
                    argument: "quantity",
                    value: raw.to_string(),
                })?;
                Ok(ShellCommand::Quantity(id, quantity))
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(value)
}

fn product_id(value: &str, command: &'static str) -> Result<ProductId, CommandError> {
    let value = required(value.trim(), command, "a product id")?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        argument: "product id",
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ShellCommand::parse("products"), Ok(ShellCommand::Products));
        assert_eq!(ShellCommand::parse("  CART "), Ok(ShellCommand::Cart));
        assert_eq!(ShellCommand::parse("exit"), Ok(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("clear"), Ok(ShellCommand::Clear));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            ShellCommand::parse("add 3"),
            Ok(ShellCommand::Add(ProductId::new(3)))
        );
        assert_eq!(
            ShellCommand::parse("qty 3 -5"),
            Ok(ShellCommand::Quantity(ProductId::new(3), -5))
        );
        assert_eq!(
            ShellCommand::parse("category men's clothing"),
            Ok(ShellCommand::Category("men's clothing".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("go /products/4"),
            Ok(ShellCommand::Go("/products/4".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ShellCommand::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            ShellCommand::parse("checkout"),
            Err(CommandError::Unknown("checkout".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("add"),
            Err(CommandError::MissingArgument {
                command: "add",
                argument: "a product id"
            })
        );
        assert_eq!(
            ShellCommand::parse("add x"),
            Err(CommandError::InvalidArgument {
                argument: "product id",
                value: "x".to_string()
            })
        );
        assert!(matches!(
            ShellCommand::parse("qty 3"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            ShellCommand::parse("qty 3 many"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommandError::Unknown("buy".to_string()).to_string(),
            "unknown command 'buy', type `help` for a list"
        );
    }
}

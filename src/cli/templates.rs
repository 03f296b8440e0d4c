use std::io::{self, Write};

use anyhow::{Result, anyhow};
use clap::Subcommand;
use crossterm::style::Stylize;

use crate::render::{BUILTIN_TEMPLATES, Template, find_template};

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List built-in templates
    List,
    /// Show a template and the fields it uses
    Show {
        /// Template name
        name: String,
    },
}

pub fn run_template_command(command: &TemplateCommand, colored: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    execute(command, colored, &mut stdout)
}

fn execute<W: Write>(command: &TemplateCommand, colored: bool, out: &mut W) -> Result<()> {
    match command {
        TemplateCommand::List => {
            let width = BUILTIN_TEMPLATES.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            for (name, format) in BUILTIN_TEMPLATES {
                let name = format!("{:<width$}", name, width = width);
                let name = if colored { name.bold().to_string() } else { name };
                writeln!(out, "{}  {}", name, format)?;
            }
        }
        TemplateCommand::Show { name } => {
            let format = find_template(name).ok_or_else(|| anyhow!("unknown template: {}", name))?;
            let template = Template::compile(format);
            let fields: Vec<&str> =
                template.placeholders().map(|placeholder| placeholder.key.as_str()).collect();

            writeln!(out, "{}", format)?;
            writeln!(out, "Fields: {}", fields.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: TemplateCommand) -> Result<String> {
        let mut out = Vec::new();
        execute(&command, false, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_shows_every_template() {
        let output = run(TemplateCommand::List).unwrap();
        assert_eq!(output.lines().count(), BUILTIN_TEMPLATES.len());
        assert!(output.contains("simple    {timestamp} [{level}] {message}"));
    }

    #[test]
    fn test_show_lists_fields() {
        let output = run(TemplateCommand::Show { name: "detailed".to_string() }).unwrap();
        assert!(output.contains("Fields: timestamp, level, message, file|basename, line"));
    }

    #[test]
    fn test_show_unknown_template() {
        let err = run(TemplateCommand::Show { name: "nope".to_string() }).unwrap_err();
        assert_eq!(err.to_string(), "unknown template: nope");
    }
}

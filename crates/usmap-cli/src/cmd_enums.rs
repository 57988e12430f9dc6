/// Implementation of `usmap enums`.
///
/// Prints every enum followed by its members in `Enum::Member` form.
use anyhow::{Result, bail};
use usmap_decoder::{DecoderConfig, EnumDef};

use crate::EnumsArgs;
use crate::input;

/// Run the `usmap enums` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if `--name`
/// matches no enum.
pub fn run(args: &EnumsArgs, config: DecoderConfig) -> Result<()> {
    let doc = input::load(&args.file, config)?;

    let selected: Vec<&EnumDef> = match &args.name {
        Some(name) => match doc.enum_def(name) {
            Some(def) => vec![def],
            None => bail!("no enum named {name:?}"),
        },
        None => doc.enums.iter().collect(),
    };

    for def in selected {
        println!("{} ({} members)", def.name, def.members.len());
        for value in qualified_members(def) {
            println!("  {value}");
        }
    }
    Ok(())
}

fn qualified_members(def: &EnumDef) -> impl Iterator<Item = String> + '_ {
    def.members
        .iter()
        .map(move |member| format!("{}::{member}", def.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_qualified_with_the_enum_name() {
        let def = EnumDef {
            name: "EColor".into(),
            members: vec!["Red".into(), "Blue".into()],
        };
        let values: Vec<_> = qualified_members(&def).collect();
        assert_eq!(values, ["EColor::Red", "EColor::Blue"]);
    }
}

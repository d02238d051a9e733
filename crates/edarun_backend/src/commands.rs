//! The ordered, named command registry backends populate.

/// A single registered command: an argv, the targets it produces, and the
/// targets or files it depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// The command line, argv-style.
    pub argv: Vec<String>,
    /// Names of the targets this command produces.
    pub targets: Vec<String>,
    /// Targets or files this command depends on.
    pub deps: Vec<String>,
}

/// An ordered collection of named build targets with one default.
///
/// Created once per synthesis pass and append-only: commands keep their
/// insertion order, and nothing is mutated after planning finishes. The
/// backends register a single `build` target wrapping the build script; the
/// run script is deliberately invoked through a separate entry point, not
/// through this graph.
#[derive(Debug, Default)]
pub struct EdaCommands {
    commands: Vec<Command>,
    default_target: Option<String>,
}

impl EdaCommands {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command with its targets and dependencies.
    pub fn add(&mut self, argv: Vec<String>, targets: Vec<String>, deps: Vec<String>) {
        self.commands.push(Command {
            argv,
            targets,
            deps,
        });
    }

    /// Sets the target an external driver invokes with no arguments.
    pub fn set_default_target(&mut self, target: impl Into<String>) {
        self.default_target = Some(target.into());
    }

    /// The default target name, if one was set.
    pub fn default_target(&self) -> Option<&str> {
        self.default_target.as_deref()
    }

    /// All registered commands in insertion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Finds the command that produces the given target.
    pub fn find_target(&self, target: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.targets.iter().any(|t| t == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_and_find() {
        let mut commands = EdaCommands::new();
        commands.add(strings(&["bash", "build.sh"]), strings(&["build"]), vec![]);
        commands.set_default_target("build");

        assert_eq!(commands.default_target(), Some("build"));
        let cmd = commands.find_target("build").unwrap();
        assert_eq!(cmd.argv, strings(&["bash", "build.sh"]));
        assert!(cmd.deps.is_empty());
    }

    #[test]
    fn missing_target() {
        let commands = EdaCommands::new();
        assert!(commands.find_target("build").is_none());
        assert!(commands.default_target().is_none());
    }

    #[test]
    fn insertion_order_preserved() {
        let mut commands = EdaCommands::new();
        commands.add(strings(&["a"]), strings(&["t1"]), vec![]);
        commands.add(strings(&["b"]), strings(&["t2"]), strings(&["t1"]));
        let all = commands.commands();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].argv, strings(&["a"]));
        assert_eq!(all[1].deps, strings(&["t1"]));
    }
}

//! Command registry
//!
//! Static table of built-in commands merged with manifest-discovered
//! plugin commands. The registry moves through a one-directional state
//! machine within a session:
//!
//! ```text
//! Empty -> BuiltinsLoaded -> PluginsMerged -> Ready
//! ```
//!
//! Lookups are served only in `Ready`. Calling a transition out of order
//! is a programming error and fails fast. Name collisions follow an
//! explicit last-write-wins policy: plugin registrations override
//! built-ins of the same name, and within the plugin set the last
//! registration in discovery order wins.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::command::arithmetic::ArithmeticCommand;
use crate::command::csv::{ExportCsvCommand, ImportCsvCommand};
use crate::command::history::{ClearHistoryCommand, DeleteCommand, HistoryCommand};
use crate::command::system::{ExitCommand, HelpCommand};
use crate::command::{Command, SessionContext};

/// Command grouping used by `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Arithmetic,
    History,
    Data,
    System,
    Plugin,
}

impl Category {
    /// Display order for help output.
    pub const ALL: [Category; 5] = [
        Category::Arithmetic,
        Category::History,
        Category::Data,
        Category::System,
        Category::Plugin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Arithmetic => "Arithmetic",
            Category::History => "History",
            Category::Data => "Data",
            Category::System => "System",
            Category::Plugin => "Plugins",
        }
    }
}

/// Factory that binds a fresh command instance to the session context.
pub type CommandBuilder = Box<dyn Fn(&SessionContext) -> Box<dyn Command>>;

/// Self-describing command entry: name, usage line, help text, and the
/// factory used by [`CommandRegistry::resolve`].
pub struct CommandSpec {
    name: String,
    usage: String,
    help: String,
    category: Category,
    builder: CommandBuilder,
}

impl CommandSpec {
    pub fn new(
        name: &str,
        usage: &str,
        help: &str,
        category: Category,
        builder: CommandBuilder,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_lowercase(),
            usage: usage.to_string(),
            help: help.to_string(),
            category,
            builder,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Construct a fresh instance bound to the given context.
    pub fn build(
        &self,
        ctx: &SessionContext,
    ) -> Box<dyn Command> {
        (self.builder)(ctx)
    }
}

/// One line of help output: a command with all names resolving to the
/// same underlying implementation.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    /// All registered names, primary first.
    pub names: Vec<String>,
    pub usage: String,
    pub help: String,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegistryState {
    Empty,
    BuiltinsLoaded,
    PluginsMerged,
    Ready,
}

/// Name-to-command lookup table for one REPL session.
pub struct CommandRegistry {
    state: RegistryState,
    entries: IndexMap<String, Rc<CommandSpec>>,
    help_entries: Rc<RefCell<Vec<HelpEntry>>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            state: RegistryState::Empty,
            entries: IndexMap::new(),
            help_entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register the built-in command set. Duplicate names among
    /// built-ins are a programming error and panic at startup.
    pub fn install_builtins(&mut self) {
        assert_eq!(
            self.state,
            RegistryState::Empty,
            "install_builtins called twice"
        );

        for operation in crate::calc::ops::names() {
            let symbol = crate::calc::ops::symbol(operation).unwrap_or('?');
            self.register_builtin(CommandSpec::new(
                operation,
                &format!("{} <a> <b>", operation),
                &format!("Apply `a {} b` and record the result", symbol),
                Category::Arithmetic,
                Box::new(move |ctx| Box::new(ArithmeticCommand::new(operation, ctx.clone()))),
            ));
        }

        self.register_builtin(CommandSpec::new(
            "history",
            "history",
            "Display calculation history",
            Category::History,
            Box::new(|ctx| Box::new(HistoryCommand::new(ctx.clone()))),
        ));
        self.register_builtin(CommandSpec::new(
            "clear",
            "clear",
            "Clear calculation history",
            Category::History,
            Box::new(|ctx| Box::new(ClearHistoryCommand::new(ctx.clone()))),
        ));
        self.register_builtin(CommandSpec::new(
            "delete",
            "delete <index>",
            "Delete the history entry at the given index",
            Category::History,
            Box::new(|ctx| Box::new(DeleteCommand::new(ctx.clone()))),
        ));

        self.register_builtin(CommandSpec::new(
            "export_csv",
            "export_csv <file>",
            "Export calculation history to a CSV file",
            Category::Data,
            Box::new(|ctx| Box::new(ExportCsvCommand::new(ctx.clone()))),
        ));
        self.register_builtin(CommandSpec::new(
            "import_csv",
            "import_csv <file>",
            "Import calculation history from a CSV file",
            Category::Data,
            Box::new(|ctx| Box::new(ImportCsvCommand::new(ctx.clone()))),
        ));

        self.register_builtin(CommandSpec::new(
            "exit",
            "exit",
            "Exit the calculator",
            Category::System,
            Box::new(|_ctx| Box::new(ExitCommand)),
        ));
        self.register_alias("quit", "exit");

        let help_entries = Rc::clone(&self.help_entries);
        self.register_builtin(CommandSpec::new(
            "help",
            "help [command]",
            "Show help for all commands, or one command",
            Category::System,
            Box::new(move |_ctx| Box::new(HelpCommand::new(Rc::clone(&help_entries)))),
        ));

        debug!("registered {} built-in commands", self.entries.len());
        self.state = RegistryState::BuiltinsLoaded;
    }

    /// Merge discovered plugin commands over the built-in set.
    /// Later registrations of an existing name win.
    pub fn merge_plugins(
        &mut self,
        plugins: Vec<(String, Rc<CommandSpec>)>,
    ) {
        assert_eq!(
            self.state,
            RegistryState::BuiltinsLoaded,
            "merge_plugins requires built-ins to be loaded first"
        );

        for (name, spec) in plugins {
            let name = name.to_lowercase();
            if self.entries.insert(name.clone(), spec).is_some() {
                info!("plugin command {:?} overrides an earlier registration", name);
            }
        }

        self.state = RegistryState::PluginsMerged;
    }

    /// Freeze the registry and build the help index. Lookups are served
    /// only after this transition.
    pub fn finalize(&mut self) {
        assert_eq!(
            self.state,
            RegistryState::PluginsMerged,
            "finalize requires plugins to be merged first"
        );

        *self.help_entries.borrow_mut() = self.build_help_entries();
        self.state = RegistryState::Ready;
    }

    /// Resolve a name to a fresh command instance bound to `ctx`.
    /// Case-insensitive; returns None for unknown names.
    pub fn resolve(
        &self,
        name: &str,
        ctx: &SessionContext,
    ) -> Option<Box<dyn Command>> {
        assert_eq!(
            self.state,
            RegistryState::Ready,
            "resolve called before the registry was finalized"
        );

        self.entries
            .get(name.to_lowercase().as_str())
            .map(|spec| spec.build(ctx))
    }

    /// All resolvable names, sorted and deduplicated.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names.dedup();
        names
    }

    /// Help index built at finalize time. Aliases that share one
    /// implementation collapse into a single entry.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.help_entries.borrow().clone()
    }

    fn register_builtin(
        &mut self,
        spec: Rc<CommandSpec>,
    ) {
        let name = spec.name().to_string();
        if self.entries.insert(name.clone(), spec).is_some() {
            panic!("duplicate built-in command: {}", name);
        }
    }

    fn register_alias(
        &mut self,
        alias: &str,
        target: &str,
    ) {
        let spec = self
            .entries
            .get(target)
            .cloned()
            .unwrap_or_else(|| panic!("alias {:?} points to unknown command {:?}", alias, target));
        if self.entries.insert(alias.to_lowercase(), spec).is_some() {
            panic!("duplicate built-in command: {}", alias);
        }
    }

    fn build_help_entries(&self) -> Vec<HelpEntry> {
        // Group names by factory identity, not by name, so aliases of
        // one implementation render once.
        let mut groups: Vec<(Rc<CommandSpec>, Vec<String>)> = Vec::new();
        for (name, spec) in &self.entries {
            match groups.iter_mut().find(|(s, _)| Rc::ptr_eq(s, spec)) {
                Some((_, names)) => names.push(name.clone()),
                None => groups.push((Rc::clone(spec), vec![name.clone()])),
            }
        }

        let mut entries: Vec<HelpEntry> = groups
            .into_iter()
            .map(|(spec, mut names)| {
                // Primary name first, the rest alphabetical.
                names.sort_by_key(|n| (n.as_str() != spec.name(), n.clone()));
                HelpEntry {
                    names,
                    usage: spec.usage().to_string(),
                    help: spec.help().to_string(),
                    category: spec.category(),
                }
            })
            .collect();

        entries.sort_by_key(|entry| {
            let order = Category::ALL
                .iter()
                .position(|c| *c == entry.category)
                .unwrap_or(Category::ALL.len());
            (order, entry.names[0].clone())
        });
        entries
    }
}

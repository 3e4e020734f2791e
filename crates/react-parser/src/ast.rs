//! Component model recovered from React source.

use smol_str::SmolStr;

/// A React component as recovered from its declaration code.
///
/// The model is built once per parse and never mutated afterwards. All
/// sequences keep the order in which their entries were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentModel {
    /// Component name, or the configured placeholder when no declaration matched.
    pub name: SmolStr,
    /// Props, unique by name.
    pub inputs: Vec<InputParam>,
    /// `useState` declarations.
    pub state_slots: Vec<StateSlot>,
    /// `useEffect` blocks with a dependency list.
    pub effects: Vec<Effect>,
    /// Helper functions declared alongside the component.
    pub functions: Vec<HelperFunction>,
    /// Import statements that survived the framework filter.
    pub imports: Vec<String>,
    /// The isolated markup span, untransformed.
    pub markup_text: String,
}

impl ComponentModel {
    /// Returns the input with the given name.
    pub fn input(&self, name: &str) -> Option<&InputParam> {
        self.inputs.iter().find(|input| input.name == name)
    }

    /// Returns the state slot with the given name.
    pub fn state_slot(&self, name: &str) -> Option<&StateSlot> {
        self.state_slots.iter().find(|slot| slot.name == name)
    }

    /// Returns the helper function with the given name.
    pub fn function(&self, name: &str) -> Option<&HelperFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A single component prop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InputParam {
    /// Prop name.
    pub name: SmolStr,
    /// Type text, copied verbatim from the source.
    pub type_text: String,
    /// Default value expression, when the source destructured `name = expr`.
    pub default_value: Option<String>,
    /// True when a default exists or the type entry was marked `?`.
    pub optional: bool,
}

/// A `const [value, setValue] = useState(init)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StateSlot {
    /// The value binding.
    pub name: SmolStr,
    /// The setter binding as declared.
    pub setter: SmolStr,
    /// Explicit generic type argument (`useState<T>`).
    pub type_text: Option<String>,
    /// Initializer expression text (may be empty).
    pub initial_value: String,
}

impl StateSlot {
    /// The setter name the `set` + capitalized-name convention predicts.
    pub fn conventional_setter(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
            None => String::from("set"),
        }
    }
}

/// A `useEffect(() => { ... }, [deps])` block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Effect {
    /// Dependency expressions. Empty means the effect runs once.
    pub dependencies: Vec<String>,
    /// Callback body text.
    pub body: String,
}

/// A helper routine defined next to the component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HelperFunction {
    /// Name the helper is bound to.
    pub name: SmolStr,
    /// Parameter list text without the surrounding parentheses.
    pub params: String,
    /// Body text with state declarations stripped and setter calls rewritten.
    pub body: String,
    /// Declared with `async`.
    pub is_async: bool,
}

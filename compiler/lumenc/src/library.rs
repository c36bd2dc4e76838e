//! Library descriptors.
//!
//! A [`Library`] names everything a program starts with: plain variables,
//! native and interpreted functions, interfaces and their implementations,
//! each with a declared signature in Lumen type syntax.
//! [`Library::environment`] flattens it into the root type scope and value
//! scope. Libraries combine with [`Library::merge`], later definitions
//! replacing earlier ones of the same name.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use lumen_diagnostic::Log;
use lumen_eval::Scope;
use lumen_types::{
    resolve_type, Type, TypeConstraint, TypeEntry, TypeImplementation, TypeInterface, TypeScope,
};
use lumen_value::{
    EvalResult, EvaluationError, LazyValue, NativeBody, NativeLambda, TypeVariable, Value,
};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::pipeline::compile;

/// Root scopes a program is compiled and evaluated against.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub types: TypeScope,
    pub values: Scope,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A declared type in source syntax, such as `(List<N>) -> N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub text: String,
    /// Names in `text` that stand for type variables.
    pub variables: Vec<String>,
    /// `(interface, arguments)` pairs the variables must satisfy.
    pub constraints: Vec<(String, Vec<String>)>,
}

impl Signature {
    /// A signature without type variables.
    pub fn of(text: &str) -> Self {
        Signature::generic(&[], text)
    }

    pub fn generic(variables: &[&str], text: &str) -> Self {
        Signature {
            text: text.to_string(),
            variables: variables.iter().map(ToString::to_string).collect(),
            constraints: Vec::new(),
        }
    }

    /// Require `interface<arguments...>`.
    #[must_use]
    pub fn constrained(mut self, interface: &str, arguments: &[&str]) -> Self {
        self.constraints.push((
            interface.to_string(),
            arguments.iter().map(ToString::to_string).collect(),
        ));
        self
    }
}

/// How a library name gets its value.
#[derive(Clone)]
pub enum Definition {
    Variable(Value),
    Native {
        arity: usize,
        body: Rc<NativeBody>,
    },
    /// Compiled against the environment built so far.
    Lambda {
        parameters: Vec<String>,
        body: String,
    },
}

impl Definition {
    pub fn native(arity: usize, body: impl Fn(&[LazyValue]) -> EvalResult + 'static) -> Self {
        Definition::Native {
            arity,
            body: Rc::new(body),
        }
    }

    pub fn lambda(parameters: &[&str], body: &str) -> Self {
        Definition::Lambda {
            parameters: parameters.iter().map(ToString::to_string).collect(),
            body: body.to_string(),
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Variable(value) => write!(f, "Variable({value})"),
            Definition::Native { arity, .. } => write!(f, "Native(arity {arity})"),
            Definition::Lambda { parameters, body } => {
                write!(f, "Lambda(({}) => {body})", parameters.join(", "))
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct LibraryValue {
    pub definition: Definition,
    pub signature: Signature,
}

#[derive(Clone, Debug, Default)]
pub struct LibraryInterface {
    pub parameters: Vec<String>,
    /// Member names with their signatures over `parameters`.
    pub members: Vec<(String, String)>,
}

/// `implement Interface<arguments...>` with one definition per member.
#[derive(Clone, Debug)]
pub struct LibraryImplementation {
    pub interface: String,
    pub arguments: Vec<String>,
    pub members: BTreeMap<String, Definition>,
}

impl LibraryImplementation {
    pub fn new(interface: &str, arguments: &[&str]) -> Self {
        LibraryImplementation {
            interface: interface.to_string(),
            arguments: arguments.iter().map(ToString::to_string).collect(),
            members: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn member(mut self, name: &str, definition: Definition) -> Self {
        self.members.insert(name.to_string(), definition);
        self
    }

    #[must_use]
    pub fn native(
        self,
        name: &str,
        arity: usize,
        body: impl Fn(&[LazyValue]) -> EvalResult + 'static,
    ) -> Self {
        self.member(name, Definition::native(arity, body))
    }

    /// Name the implementation is merged under, such as `Numeric<Integer>`.
    pub fn key(&self) -> String {
        format!("{}<{}>", self.interface, self.arguments.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("invalid signature for {name}: {messages}")]
    Signature { name: String, messages: String },

    #[error("unknown interface {interface} in {name}")]
    UnknownInterface { name: String, interface: String },

    #[error("implementation {key} is missing member {member}")]
    MissingMember { key: String, member: String },

    #[error("{member} is not a member of {interface}")]
    UnknownMember { interface: String, member: String },

    #[error("library lambda {name} does not compile: {messages}")]
    Lambda { name: String, messages: String },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

fn joined(log: &Log) -> String {
    log.iter()
        .map(|message| message.text.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone, Debug, Default)]
pub struct Library {
    pub values: BTreeMap<String, LibraryValue>,
    pub interfaces: BTreeMap<String, LibraryInterface>,
    pub implementations: BTreeMap<String, LibraryImplementation>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn define(mut self, name: &str, signature: Signature, definition: Definition) -> Self {
        self.values.insert(
            name.to_string(),
            LibraryValue {
                definition,
                signature,
            },
        );
        self
    }

    #[must_use]
    pub fn variable(self, name: &str, signature: Signature, value: Value) -> Self {
        self.define(name, signature, Definition::Variable(value))
    }

    #[must_use]
    pub fn native(
        self,
        name: &str,
        signature: Signature,
        arity: usize,
        body: impl Fn(&[LazyValue]) -> EvalResult + 'static,
    ) -> Self {
        self.define(name, signature, Definition::native(arity, body))
    }

    #[must_use]
    pub fn lambda(self, name: &str, signature: Signature, parameters: &[&str], body: &str) -> Self {
        self.define(name, signature, Definition::lambda(parameters, body))
    }

    #[must_use]
    pub fn interface(mut self, name: &str, parameters: &[&str], members: &[(&str, &str)]) -> Self {
        self.interfaces.insert(
            name.to_string(),
            LibraryInterface {
                parameters: parameters.iter().map(ToString::to_string).collect(),
                members: members
                    .iter()
                    .map(|(member, signature)| ((*member).to_string(), (*signature).to_string()))
                    .collect(),
            },
        );
        self
    }

    #[must_use]
    pub fn implementation(mut self, implementation: LibraryImplementation) -> Self {
        self.implementations
            .insert(implementation.key(), implementation);
        self
    }

    /// Shallow union; `other` wins on every name both define.
    #[must_use]
    pub fn merge(mut self, other: Library) -> Library {
        self.values.extend(other.values);
        self.interfaces.extend(other.interfaces);
        self.implementations.extend(other.implementations);
        self
    }

    /// Build the root scopes.
    ///
    /// Interfaces are declared first, then variables and natives, then
    /// implementations with their dictionaries, and finally lambdas in name
    /// order. A lambda body sees everything before it but not itself.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(values = self.values.len(), implementations = self.implementations.len())
    )]
    pub fn environment(&self) -> Result<Environment, LibraryError> {
        let mut environment = Environment::new();

        for (name, interface) in &self.interfaces {
            declare_interface(&mut environment.types, name, interface)?;
        }

        for (name, value) in &self.values {
            if matches!(value.definition, Definition::Lambda { .. }) {
                continue;
            }
            let entry = signature_entry(name, &value.signature)?;
            environment.types.bind(name.clone(), entry);
            let value = definition_value(name, &value.definition, &environment)?;
            environment.values.bind(name.clone(), value);
        }

        let mut declared = Vec::with_capacity(self.implementations.len());
        for implementation in self.implementations.values() {
            let key = declare_implementation(&mut environment.types, implementation)?;
            declared.push((key, implementation));
        }
        let mut dictionaries = Vec::with_capacity(declared.len());
        for (key, implementation) in declared {
            let members = implementation
                .members
                .iter()
                .map(|(member, definition)| {
                    let name = format!("{key}.{member}");
                    let value = definition_value(&name, definition, &environment)?;
                    Ok((member.clone(), value))
                })
                .collect::<Result<Vec<_>, LibraryError>>()?;
            dictionaries.push((key, Value::record(members)));
        }
        for (key, dictionary) in dictionaries {
            environment.values.bind(key, dictionary.into_lazy());
        }

        for (name, value) in &self.values {
            if !matches!(value.definition, Definition::Lambda { .. }) {
                continue;
            }
            let entry = signature_entry(name, &value.signature)?;
            let compiled = definition_value(name, &value.definition, &environment)?;
            environment.types.bind(name.clone(), entry);
            environment.values.bind(name.clone(), compiled);
        }

        debug!("library environment ready");
        Ok(environment)
    }
}

/// Parse and resolve one piece of type syntax.
fn parse_type(
    name: &str,
    text: &str,
    variables: &FxHashMap<String, LazyValue>,
) -> Result<LazyValue, LibraryError> {
    let tokenized = lumen_lexer::tokenize(text);
    let mut log = tokenized.messages;
    let parsed = lumen_parse::interpret_type_expression(&tokenized.tokens);
    log.append(parsed.messages);
    let (resolution, value) = resolve_type(&parsed.ty, variables);
    log.append(resolution);
    if log.is_empty() {
        Ok(value)
    } else {
        Err(LibraryError::Signature {
            name: name.to_string(),
            messages: joined(&log),
        })
    }
}

fn signature_type(name: &str, signature: &Signature) -> Result<Type, LibraryError> {
    let variables: FxHashMap<String, LazyValue> = signature
        .variables
        .iter()
        .map(|variable| {
            let fresh = TypeVariable::fresh(variable.as_str());
            (variable.clone(), Value::UnboundVariable(fresh).into_lazy())
        })
        .collect();
    let value = parse_type(name, &signature.text, &variables)?;

    let mut constraints = Vec::with_capacity(signature.constraints.len());
    for (interface, arguments) in &signature.constraints {
        let mut arguments = arguments
            .iter()
            .map(|argument| parse_type(name, argument, &variables))
            .collect::<Result<Vec<_>, _>>()?;
        if arguments.is_empty() {
            return Err(LibraryError::Signature {
                name: name.to_string(),
                messages: format!("constraint {interface} needs a type argument"),
            });
        }
        let child = arguments.remove(0);
        constraints.push(TypeConstraint::new(interface, child, arguments));
    }
    Ok(Type::new(value).with_constraints(constraints))
}

fn signature_entry(name: &str, signature: &Signature) -> Result<TypeEntry, LibraryError> {
    let ty = signature_type(name, signature)?;
    if signature.variables.is_empty() {
        Ok(TypeEntry::value(ty))
    } else {
        Ok(TypeEntry::generic(ty)?)
    }
}

fn declare_interface(
    types: &mut TypeScope,
    name: &str,
    interface: &LibraryInterface,
) -> Result<(), LibraryError> {
    if interface.parameters.is_empty() {
        return Err(LibraryError::Signature {
            name: name.to_string(),
            messages: format!("Interface {name} needs a type parameter."),
        });
    }
    let parameters: Vec<TypeVariable> = interface
        .parameters
        .iter()
        .map(|parameter| TypeVariable::fresh(parameter.as_str()))
        .collect();
    let variables: FxHashMap<String, LazyValue> = interface
        .parameters
        .iter()
        .cloned()
        .zip(
            parameters
                .iter()
                .map(|parameter| Value::UnboundVariable(parameter.clone()).into_lazy()),
        )
        .collect();

    let members = interface
        .members
        .iter()
        .map(|(member, text)| {
            let signature = parse_type(&format!("{name}.{member}"), text, &variables)?;
            Ok((member.clone(), signature))
        })
        .collect::<Result<Vec<_>, LibraryError>>()?;

    let interface = Rc::new(TypeInterface {
        name: Rc::from(name),
        parameters,
        members,
    });
    for (member, signature) in &interface.members {
        types.bind(member.clone(), interface.member_entry(signature));
    }
    types.declare_interface(interface);
    Ok(())
}

/// Check the members and declare the implementation. Returns its key.
fn declare_implementation(
    types: &mut TypeScope,
    implementation: &LibraryImplementation,
) -> Result<String, LibraryError> {
    let name = implementation.key();
    let Some(interface) = types.interface(&implementation.interface) else {
        return Err(LibraryError::UnknownInterface {
            name,
            interface: implementation.interface.clone(),
        });
    };

    let arguments = implementation
        .arguments
        .iter()
        .map(|argument| parse_type(&name, argument, &FxHashMap::default()))
        .collect::<Result<Vec<_>, _>>()?;
    if arguments.len() != interface.parameters.len() {
        return Err(LibraryError::Signature {
            name,
            messages: format!(
                "Interface {} expects {} type argument(s).",
                interface.name,
                interface.parameters.len()
            ),
        });
    }
    for (member, _) in &interface.members {
        if !implementation.members.contains_key(member) {
            return Err(LibraryError::MissingMember {
                key: name,
                member: member.clone(),
            });
        }
    }
    for member in implementation.members.keys() {
        if interface.member(member).is_none() {
            return Err(LibraryError::UnknownMember {
                interface: implementation.interface.clone(),
                member: member.clone(),
            });
        }
    }

    let declared = Rc::new(TypeImplementation::new(&implementation.interface, arguments)?);
    let key = declared.key.clone();
    types.declare_implementation(declared);
    Ok(key)
}

fn definition_value(
    name: &str,
    definition: &Definition,
    environment: &Environment,
) -> Result<LazyValue, LibraryError> {
    match definition {
        Definition::Variable(value) => Ok(value.clone().into_lazy()),
        Definition::Native { arity, body } => Ok(Value::NativeLambda(NativeLambda {
            name: Rc::from(name),
            arity: *arity,
            body: Rc::clone(body),
        })
        .into_lazy()),
        Definition::Lambda { parameters, body } => {
            let source = format!("({}) => {body}", parameters.join(", "));
            let compiled = compile(&source, environment);
            match compiled.expression {
                Some(expression) if compiled.compiled => {
                    Ok(lumen_eval::evaluate(&environment.values, &expression))
                }
                _ => Err(LibraryError::Lambda {
                    name: name.to_string(),
                    messages: joined(&compiled.messages),
                }),
            }
        }
    }
}

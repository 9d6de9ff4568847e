//! Explicit action registry replacing convention-based call dispatch.
//!
//! Call names keep the legacy `verbResource` shape (`"findUser"`), but the verb set is
//! a closed [`Action`] enum and handlers are registered up front instead of being
//! resolved reflectively at call time. Lookups that miss the exact action fall back to
//! the resource's `find` handler; unknown resources yield `None`.

// self
use crate::_prelude::*;

/// Future type returned by registered handlers.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Value>>> + 'a + Send>>;

/// Boxed handler operating on the caller-supplied context.
pub type Handler<Ctx> = Box<dyn for<'a> Fn(&'a mut Ctx, Value) -> HandlerFuture<'a> + Send + Sync>;

/// Hook invoked before any of a resource's handlers run.
pub type PreHook<Ctx> = Box<dyn Fn(&mut Ctx, &Value) -> Result<()> + Send + Sync>;

/// Errors raised while parsing call names.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DispatchError {
	/// The call name is not a lowercase verb followed by a capitalized resource.
	#[error("Call name `{name}` must be a lowercase verb followed by a capitalized resource.")]
	MalformedName {
		/// The rejected call name.
		name: String,
	},
	/// The verb prefix does not name a known action.
	#[error("Verb `{verb}` is not a known action.")]
	UnknownAction {
		/// The rejected verb prefix.
		verb: String,
	},
}

/// Closed verb set accepted in call names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
	/// Look up a resource; also the fallback for unregistered verbs.
	Find,
	/// Create a resource.
	Create,
	/// Update a resource.
	Update,
	/// Delete a resource.
	Delete,
}
impl Action {
	/// Returns the lowercase verb this action answers to.
	pub const fn as_str(self) -> &'static str {
		match self {
			Action::Find => "find",
			Action::Create => "create",
			Action::Update => "update",
			Action::Delete => "delete",
		}
	}
}
impl Display for Action {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Action {
	type Err = DispatchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"find" => Ok(Action::Find),
			"create" => Ok(Action::Create),
			"update" => Ok(Action::Update),
			"delete" => Ok(Action::Delete),
			_ => Err(DispatchError::UnknownAction { verb: s.to_owned() }),
		}
	}
}

/// Parsed `verbResource` call name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodName {
	/// Action parsed from the verb prefix.
	pub action: Action,
	/// Capitalized resource the call targets.
	pub resource: String,
}
impl MethodName {
	/// Splits `"findUser"` into [`Action::Find`] and `"User"`.
	pub fn parse(name: &str) -> Result<Self, DispatchError> {
		let split = name
			.find(|c: char| c.is_ascii_uppercase())
			.ok_or_else(|| DispatchError::MalformedName { name: name.to_owned() })?;
		let (verb, resource) = name.split_at(split);

		if verb.is_empty() || !verb.chars().all(|c| c.is_ascii_lowercase()) {
			return Err(DispatchError::MalformedName { name: name.to_owned() });
		}

		let action = verb.parse()?;

		Ok(Self { action, resource: resource.to_owned() })
	}
}

/// Explicit mapping from `(resource, action)` pairs to handlers.
///
/// `Ctx` is whatever state handlers need—typically the [`ApiClient`](crate::client::ApiClient)
/// itself, but the registry does not care.
pub struct ServiceRegistry<Ctx> {
	handlers: HashMap<String, HashMap<Action, Handler<Ctx>>>,
	pre_hooks: HashMap<String, PreHook<Ctx>>,
}
impl<Ctx> ServiceRegistry<Ctx> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self { handlers: HashMap::new(), pre_hooks: HashMap::new() }
	}

	/// Registers a handler for the resource + action pair, replacing any previous one.
	pub fn handle(
		&mut self,
		resource: impl Into<String>,
		action: Action,
		handler: Handler<Ctx>,
	) -> &mut Self {
		self.handlers.entry(resource.into()).or_default().insert(action, handler);

		self
	}

	/// Registers a hook that runs before any of the resource's handlers.
	pub fn pre_hook(&mut self, resource: impl Into<String>, hook: PreHook<Ctx>) -> &mut Self {
		self.pre_hooks.insert(resource.into(), hook);

		self
	}

	/// True when the resource has at least one registered handler.
	pub fn knows(&self, resource: &str) -> bool {
		self.handlers.contains_key(resource)
	}

	/// Parses `name`, runs the resource's pre-hook, and invokes the matching handler.
	///
	/// A missing `(resource, action)` entry falls back to the resource's
	/// [`Action::Find`] handler; a resource with no handlers at all yields
	/// `Ok(None)`. Malformed names and unknown verbs are dispatch errors.
	pub async fn dispatch(&self, name: &str, ctx: &mut Ctx, args: Value) -> Result<Option<Value>> {
		let method = MethodName::parse(name)?;
		let Some(actions) = self.handlers.get(&method.resource) else {
			return Ok(None);
		};
		let Some(handler) = actions.get(&method.action).or_else(|| actions.get(&Action::Find))
		else {
			return Ok(None);
		};

		if let Some(hook) = self.pre_hooks.get(&method.resource) {
			hook(ctx, &args)?;
		}

		handler(ctx, args).await
	}
}
impl<Ctx> Default for ServiceRegistry<Ctx> {
	fn default() -> Self {
		Self::new()
	}
}
impl<Ctx> Debug for ServiceRegistry<Ctx> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceRegistry")
			.field("resources", &self.handlers.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::Value;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn call_names_split_verb_and_resource() {
		let method = MethodName::parse("findUser").expect("Well-formed name should parse.");

		assert_eq!(method.action, Action::Find);
		assert_eq!(method.resource, "User");

		let method =
			MethodName::parse("deleteLoginSession").expect("Well-formed name should parse.");

		assert_eq!(method.action, Action::Delete);
		assert_eq!(method.resource, "LoginSession");
	}

	#[test]
	fn malformed_names_are_rejected() {
		assert!(matches!(
			MethodName::parse("finduser"),
			Err(DispatchError::MalformedName { .. })
		));
		assert!(matches!(MethodName::parse("User"), Err(DispatchError::MalformedName { .. })));
		assert!(matches!(
			MethodName::parse("find2User"),
			Err(DispatchError::MalformedName { .. })
		));
		assert!(matches!(
			MethodName::parse("fetchUser"),
			Err(DispatchError::UnknownAction { verb }) if verb == "fetch"
		));
	}

	#[tokio::test]
	async fn dispatch_falls_back_to_find() {
		let mut registry: ServiceRegistry<Vec<&'static str>> = ServiceRegistry::new();

		registry.handle(
			"User",
			Action::Find,
			Box::new(|calls, _args| {
				calls.push("find");

				Box::pin(async { Ok(Some(Value::from("found"))) })
			}),
		);

		let mut calls = Vec::new();
		let exact = registry
			.dispatch("findUser", &mut calls, Value::Null)
			.await
			.expect("Registered dispatch should succeed.");
		let fallback = registry
			.dispatch("updateUser", &mut calls, Value::Null)
			.await
			.expect("Fallback dispatch should succeed.");

		assert_eq!(exact, Some(Value::from("found")));
		assert_eq!(fallback, Some(Value::from("found")));
		assert_eq!(calls, ["find", "find"]);
	}

	#[tokio::test]
	async fn unknown_resources_yield_none() {
		let registry: ServiceRegistry<()> = ServiceRegistry::new();
		let result = registry
			.dispatch("findGhost", &mut (), Value::Null)
			.await
			.expect("Unknown resources should not error.");

		assert_eq!(result, None);
	}

	#[tokio::test]
	async fn pre_hooks_run_before_handlers_and_can_veto() {
		let mut registry: ServiceRegistry<Vec<&'static str>> = ServiceRegistry::new();

		registry
			.handle(
				"User",
				Action::Find,
				Box::new(|calls, _args| {
					calls.push("handler");

					Box::pin(async { Ok(None) })
				}),
			)
			.pre_hook(
				"User",
				Box::new(|calls, args| {
					calls.push("hook");

					if args.is_null() {
						Err(crate::dispatch::DispatchError::MalformedName {
							name: "vetoed".into(),
						})?;
					}

					Ok(())
				}),
			);

		let mut calls = Vec::new();

		registry
			.dispatch("findUser", &mut calls, Value::from(1))
			.await
			.expect("Hook-approved dispatch should succeed.");

		assert_eq!(calls, ["hook", "handler"]);

		let err = registry
			.dispatch("findUser", &mut calls, Value::Null)
			.await
			.expect_err("Hook veto should surface.");

		assert!(matches!(err, Error::Dispatch(_)));
		assert_eq!(calls, ["hook", "handler", "hook"]);
	}
}

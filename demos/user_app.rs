// A user-lookup application assembled by the container.
//
// Run with: cargo run --example user_app

use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;

use chassis::component::downcast;
use chassis::{
    Application, Component, ComponentDescriptor, ComponentView, Dependency, HandlerError,
    Instantiated, LogConfig, Role,
};

/// Capability for looking users up by id.
pub trait UserService: Send + Sync {
    fn get_by_id(&self, id: &str) -> String;
}

/// Fixed in-memory user store.
pub struct InMemoryUserService {
    users: HashMap<&'static str, &'static str>,
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        let mut users = HashMap::new();
        users.insert("1", "ada");
        users.insert("2", "grace");
        users.insert("42", "linus");
        Self { users }
    }
}

impl Component for InMemoryUserService {}

impl UserService for InMemoryUserService {
    fn get_by_id(&self, id: &str) -> String {
        match self.users.get(id) {
            Some(name) => format!("user {id}: {name}"),
            None => format!("no user with id {id}"),
        }
    }
}

inventory::submit! {
    ComponentDescriptor::new("user_app::InMemoryUserService", || {
        Ok(Instantiated::of(InMemoryUserService::default()))
    })
    .role(Role::Service)
    .implements("user_app::UserService", |concrete| {
        let service = concrete.downcast_ref::<Arc<InMemoryUserService>>()?;
        let capability: Arc<dyn UserService> = service.clone();
        let view: ComponentView = Arc::new(capability);
        Some(view)
    })
}

/// Request-handling component mapped under `/user`.
#[derive(Default)]
pub struct UserController {
    user_service: Dependency<dyn UserService>,
}

impl Component for UserController {}

impl UserController {
    fn get_by_id(&self, id: &str) -> Result<String, HandlerError> {
        match self.user_service.get() {
            Some(service) => Ok(service.get_by_id(id)),
            None => Err(HandlerError::Failed("user service not wired".to_string())),
        }
    }
}

inventory::submit! {
    ComponentDescriptor::new("user_app::UserController", || {
        Ok(Instantiated::of(UserController::default()))
    })
    .role(Role::Handler)
    .base_path("/user")
    .wires("user_service", None, "user_app::UserService", |target, entry| {
        let Some(controller) = downcast::<UserController>(target) else {
            return false;
        };
        match entry.extract::<dyn UserService>() {
            Some(service) => {
                controller.user_service.fill(service);
                true
            }
            None => false,
        }
    })
    .route("get_by_id", "/getById", |target, id| {
        let Some(controller) = downcast::<UserController>(target) else {
            return Err(HandlerError::ReceiverMismatch("user_app::UserController"));
        };
        let id = id.ok_or(HandlerError::MissingParameter("id"))?;
        controller.get_by_id(id)
    })
}

fn main() -> ExitCode {
    LogConfig::new().level("info").init();

    let app = match Application::from_config_file("demos/user_app.properties") {
        Ok(app) => app,
        Err(error) => {
            tracing::error!(%error, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    for (path, id) in [
        ("/user/getById", Some("42")),
        ("/user/getById", Some("7")),
        ("/user/getById", None),
        ("/nope", Some("42")),
    ] {
        let outcome = app.dispatch(path, id);
        println!("{path} id={id:?} -> {outcome:?}");
    }

    ExitCode::SUCCESS
}

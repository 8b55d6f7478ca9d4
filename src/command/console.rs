use crate::command::cache::ResponseCache;
use crate::command::context::ClientContext;
use crate::command::dispatch::Dispatcher;
use crate::command::entities::EntitiesCommand;
use crate::command::entity::EntityCommand;
use crate::command::transport::Transport;
use crate::model::{Permission, Schedule, Tag, Task};
use std::sync::Arc;

/// The fully wired console client: one typed command pair per resource
/// kind, all sharing a session context and response cache.
///
/// Commands are resolved here, at construction time; there is no runtime
/// registration by name.
pub struct ConsoleClient {
    pub context: Arc<ClientContext>,
    pub cache: Arc<ResponseCache>,

    pub task: EntityCommand<Task>,
    pub tasks: EntitiesCommand<Task>,
    pub schedule: EntityCommand<Schedule>,
    pub schedules: EntitiesCommand<Schedule>,
    pub tag: EntityCommand<Tag>,
    pub tags: EntitiesCommand<Tag>,
    pub permission: EntityCommand<Permission>,
    pub permissions: EntitiesCommand<Permission>,
}

impl ConsoleClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let context = Arc::new(ClientContext::new());
        let cache = Arc::new(ResponseCache::new());
        let dispatcher = Dispatcher::new(transport, context.clone(), Some(cache.clone()));

        ConsoleClient {
            context,
            cache,
            task: EntityCommand::from_dispatcher(dispatcher.clone()),
            tasks: EntitiesCommand::from_dispatcher(dispatcher.clone()),
            schedule: EntityCommand::from_dispatcher(dispatcher.clone()),
            schedules: EntitiesCommand::from_dispatcher(dispatcher.clone()),
            tag: EntityCommand::from_dispatcher(dispatcher.clone()),
            tags: EntitiesCommand::from_dispatcher(dispatcher.clone()),
            permission: EntityCommand::from_dispatcher(dispatcher.clone()),
            permissions: EntitiesCommand::from_dispatcher(dispatcher),
        }
    }
}

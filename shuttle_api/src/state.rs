use shuttle_dispatch::dispatcher::Dispatcher;

pub struct AppState<S> {
    pub dispatcher: Dispatcher<S>,
}

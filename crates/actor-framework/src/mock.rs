//! # Mocking
//!
//! Two ways to stand in for a real [`ResourceActor`](crate::ResourceActor) in tests.
//!
//! **Scripted replies** with [`MockClient`]: queue expectations in the order
//! the code under test will issue requests, hand out [`MockClient::client`],
//! then call [`MockClient::verify`].
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Table { id: u32, seats: u8 }
//! #[derive(Debug)] struct TableCreate;
//! #[derive(Debug)] struct TableUpdate;
//! #[derive(Debug)] enum TableAction {}
//! #[derive(Debug, thiserror::Error)] #[error("table error")] struct TableError;
//!
//! #[async_trait]
//! impl ActorEntity for Table {
//!     type Id = u32; type Create = TableCreate; type Update = TableUpdate;
//!     type Action = TableAction; type ActionResult = (); type Context = (); type Error = TableError;
//!     fn from_create_params(id: u32, _: TableCreate) -> Result<Self, Self::Error> { Ok(Self { id, seats: 2 }) }
//!     async fn on_update(&mut self, _: TableUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: TableAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Table>::new();
//!     mock.expect_list().return_ok(vec![Table { id: 1, seats: 4 }]);
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap()[0].seats, 4);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! **Raw channel** with [`create_mock_client`]: the test owns the receiving
//! end, inspects each request with the `expect_*` helpers and answers through
//! the returned responder. Useful when the payload itself must be asserted,
//! or when a test needs to prove that *no* request was sent.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A queued reply for the next matching request.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::Create(_) => "create",
            Expectation::List(_) => "list",
            Expectation::Update(_) => "update",
            Expectation::Action(_) => "action",
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Action { .. } => "action",
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client whose replies come from a FIFO of expectations.
///
/// A request that does not match the head of the queue panics the serving
/// task; the caller then observes [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside
    /// a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, next) => {
                        panic!(
                            "Unexpected {} request; next expectation: {}",
                            request_kind(&request),
                            next.as_ref().map_or("none", Expectation::kind)
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::Action)
    }

    /// Number of expectations not consumed yet.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with the reply to send back.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, reply: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(reply));
    }
}

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next request, if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Courier {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct CourierCreate {
        name: String,
    }

    #[derive(Debug)]
    struct CourierUpdate;

    #[derive(Debug)]
    enum CourierAction {
        Ping,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("courier error")]
    struct CourierError;

    #[async_trait]
    impl ActorEntity for Courier {
        type Id = u32;
        type Create = CourierCreate;
        type Update = CourierUpdate;
        type Action = CourierAction;
        type ActionResult = bool;
        type Context = ();
        type Error = CourierError;

        fn from_create_params(id: u32, params: CourierCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: CourierUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: CourierAction, _: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn courier(id: u32, name: &str) -> Courier {
        Courier {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn raw_channel_exposes_the_create_payload() {
        let (client, mut receiver) = create_mock_client::<Courier>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CourierCreate {
                    name: "Ravi".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Ravi");
        responder.send(Ok(7)).unwrap();

        assert!(matches!(create_task.await.unwrap(), Ok(7)));
    }

    #[tokio::test]
    async fn raw_channel_answers_list_and_action() {
        let (client, mut receiver) = create_mock_client::<Courier>(10);

        let task = tokio::spawn(async move {
            let all = client.list().await?;
            let pinged = client.perform_action(1, CourierAction::Ping).await?;
            Ok::<_, FrameworkError>((all, pinged))
        });

        let responder = expect_list(&mut receiver).await.expect("Expected List");
        responder.send(Ok(vec![courier(1, "Asha")])).unwrap();

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action");
        assert_eq!(id, 1);
        assert!(matches!(action, CourierAction::Ping));
        responder.send(Ok(false)).unwrap();

        let (all, pinged) = task.await.unwrap().unwrap();
        assert_eq!(all, vec![courier(1, "Asha")]);
        assert!(!pinged);
    }

    #[tokio::test]
    async fn scripted_replies_are_served_in_order() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(courier(1, "Asha")));
        mock.expect_update(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();
        let id = client
            .create(CourierCreate {
                name: "Asha".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(courier(1, "Asha")));
        assert!(matches!(
            client.update(1, CourierUpdate).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_surfaces_as_dropped_reply() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_list().return_ok(vec![]);

        let client = mock.client();
        let result = client.get(3).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_reports_unused_expectations() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_list().return_ok(vec![]);
        mock.verify();
    }
}

use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Rider {
    id: u32,
    name: String,
    deliveries: u32,
    on_shift: bool,
}

#[derive(Debug)]
struct RiderCreate {
    name: String,
}

#[derive(Debug)]
struct RiderUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum RiderAction {
    StartShift,
    CompleteDelivery,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum RiderError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("rider is off shift")]
    OffShift,
}

#[async_trait]
impl ActorEntity for Rider {
    type Id = u32;
    type Create = RiderCreate;
    type Update = RiderUpdate;
    type Action = RiderAction;
    type ActionResult = u32;
    type Context = ();
    type Error = RiderError;

    fn from_create_params(id: u32, params: RiderCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(RiderError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            deliveries: 0,
            on_shift: false,
        })
    }

    async fn on_update(&mut self, update: RiderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: RiderAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            RiderAction::StartShift => {
                self.on_shift = true;
                Ok(self.deliveries)
            }
            RiderAction::CompleteDelivery if self.on_shift => {
                self.deliveries += 1;
                Ok(self.deliveries)
            }
            RiderAction::CompleteDelivery => Err(RiderError::OffShift),
        }
    }
}

struct RiderClient {
    inner: ResourceClient<Rider>,
}

#[async_trait]
impl ActorClient<Rider> for RiderClient {
    type Error = String;

    fn inner(&self) -> &ResourceClient<Rider> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.to_string()
    }
}

fn create(name: &str) -> RiderCreate {
    RiderCreate {
        name: name.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn full_lifecycle_through_a_real_actor() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(create("Asha")).await.unwrap();
    assert_eq!(id, 1);

    let err = client
        .perform_action(id, RiderAction::CompleteDelivery)
        .await
        .unwrap_err();
    assert_eq!(err.entity_error::<RiderError>(), Some(&RiderError::OffShift));

    client.perform_action(id, RiderAction::StartShift).await.unwrap();
    let done = client
        .perform_action(id, RiderAction::CompleteDelivery)
        .await
        .unwrap();
    assert_eq!(done, 1);

    let renamed = client
        .update(
            id,
            RiderUpdate {
                name: Some("Asha K".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Asha K");
    assert_eq!(renamed.deliveries, 1);

    assert!(client.get(id + 1).await.unwrap().is_none());
    assert!(matches!(
        client.update(id + 1, RiderUpdate { name: None }).await,
        Err(FrameworkError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn list_returns_creation_order_and_rejections_do_not_burn_ids() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(create("Asha")).await.unwrap();
    let rejected = client.create(create("  ")).await.unwrap_err();
    assert_eq!(
        rejected.entity_error::<RiderError>(),
        Some(&RiderError::EmptyName)
    );
    let second = client.create(create("Vikram")).await.unwrap();
    assert_eq!((first, second), (1, 2));

    for n in 3..=11 {
        let id = client.create(create(&format!("rider {n}"))).await.unwrap();
        assert_eq!(id, n);
    }

    // ids 10 and 11 must sort after 2 even though "10" < "2" as text
    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names.len(), 11);
    assert_eq!(names[0], "Asha");
    assert_eq!(names[1], "Vikram");
    assert_eq!(names[10], "rider 11");
}

#[tokio::test]
async fn actor_client_defaults_forward_to_the_actor() {
    let (actor, inner) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));
    let riders = RiderClient { inner };

    riders.inner().create(create("Asha")).await.unwrap();
    assert_eq!(riders.list().await.unwrap().len(), 1);
    assert!(riders.get(1).await.unwrap().is_some());
    assert!(riders.get(2).await.unwrap().is_none());
}

#[tokio::test]
async fn calls_fail_once_the_actor_is_gone() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    drop(actor);

    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}

//! Debounced autosave.
//!
//! [`Autosaver`] owns an [`EditorSession`] and feeds every complete draft to a
//! [`Debouncer`]. When the quiet period ends the draft is written through a
//! [`PostGateway`] and the outcome is reported on the event channel.
//!
//! A post is created at most once per session: while a save without an id is
//! in flight, later saves wait for it and then carry the id it was given.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use quill_shared::PostDto;

use crate::client::GraphQLClient;
use crate::debounce::Debouncer;
use crate::editor::{Draft, EditorSession, Field, Navigation};
use crate::error::ClientError;

/// Default quiet period before an autosave fires.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

/// Read and write access to stored posts.
#[async_trait]
pub trait PostGateway: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<PostDto, ClientError>;
    async fn save(&self, draft: &Draft) -> Result<PostDto, ClientError>;
}

#[async_trait]
impl PostGateway for GraphQLClient {
    async fn fetch(&self, id: &str) -> Result<PostDto, ClientError> {
        self.post(id).await
    }

    async fn save(&self, draft: &Draft) -> Result<PostDto, ClientError> {
        self.update(draft).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveEvent {
    Saved(PostDto),
    Navigate(Navigation),
    Failed(String),
}

pub struct Autosaver {
    session: Arc<Mutex<EditorSession>>,
    debouncer: Debouncer<Draft>,
}

impl Autosaver {
    /// Open the editor on `id`, or on a blank post. An existing post is
    /// fetched before this returns.
    pub async fn open(
        gateway: Arc<dyn PostGateway>,
        id: Option<&str>,
        delay: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<AutosaveEvent>), ClientError> {
        let mut session = EditorSession::open(id);
        if let Some(id) = session.loading_id().map(str::to_owned) {
            let post = gateway.fetch(&id).await?;
            session.loaded(post);
        }

        let session = Arc::new(Mutex::new(session));
        let (events, rx) = mpsc::unbounded_channel();

        let creating = Arc::new(Mutex::new(()));
        let debouncer = Debouncer::new(delay, {
            let session = session.clone();
            move |draft: Draft| {
                save(
                    gateway.clone(),
                    session.clone(),
                    creating.clone(),
                    events.clone(),
                    draft,
                )
            }
        });

        Ok((Self { session, debouncer }, rx))
    }

    /// Apply a keystroke and schedule an autosave if the draft is complete.
    pub async fn edit(&self, field: Field, value: impl Into<String>) -> bool {
        let due = self.session.lock().await.edit(field, value);
        match due {
            Some(draft) => {
                self.debouncer.trigger(draft);
                true
            }
            None => false,
        }
    }

    /// Save now, skipping the quiet period.
    pub async fn publish(&self) -> Result<(), ClientError> {
        let draft = self.session.lock().await.draft().clone();
        if !draft.is_publishable() {
            return Err(ClientError::Incomplete("title and body are required"));
        }
        self.debouncer.flush(draft);
        Ok(())
    }

    pub async fn draft(&self) -> Draft {
        self.session.lock().await.draft().clone()
    }

    pub async fn route(&self) -> String {
        self.session.lock().await.route()
    }

    /// Save anything still waiting out the quiet period and wait for every
    /// save to finish. The event channel closes once the last outcome is sent.
    pub async fn close(self) {
        self.debouncer.shutdown().await;
    }
}

async fn save(
    gateway: Arc<dyn PostGateway>,
    session: Arc<Mutex<EditorSession>>,
    creating: Arc<Mutex<()>>,
    events: mpsc::UnboundedSender<AutosaveEvent>,
    mut draft: Draft,
) {
    // Held until the server has assigned an id to the new post.
    let _create_guard = if draft.id.is_none() {
        let guard = creating.lock().await;
        draft.id = session.lock().await.draft().id.clone();
        draft.id.is_none().then_some(guard)
    } else {
        None
    };

    match gateway.save(&draft).await {
        Ok(post) => {
            tracing::debug!(post_id = %post.id, "Autosaved draft");
            let navigation = session.lock().await.saved(&post);
            let _ = events.send(AutosaveEvent::Saved(post));
            if let Some(navigation) = navigation {
                let _ = events.send(AutosaveEvent::Navigate(navigation));
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Autosave failed");
            let _ = events.send(AutosaveEvent::Failed(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use tokio::time::{Instant, sleep};

    #[derive(Default)]
    struct FakeGateway {
        saves: StdMutex<Vec<Draft>>,
        latency: Duration,
    }

    impl FakeGateway {
        fn slow(latency: Duration) -> Self {
            Self {
                latency,
                ..Self::default()
            }
        }

        fn saves(&self) -> Vec<Draft> {
            self.saves.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostGateway for FakeGateway {
        async fn fetch(&self, id: &str) -> Result<PostDto, ClientError> {
            if id == "missing" {
                return Err(ClientError::MissingData);
            }
            Ok(PostDto {
                id: id.to_string(),
                title: "Stored".into(),
                body: "Stored body".into(),
                author: "Owner".into(),
                image: None,
            })
        }

        async fn save(&self, draft: &Draft) -> Result<PostDto, ClientError> {
            let minted = {
                let mut saves = self.saves.lock().unwrap();
                saves.push(draft.clone());
                format!("p-{}", saves.iter().filter(|d| d.id.is_none()).count())
            };
            sleep(self.latency).await;
            Ok(PostDto {
                id: draft.id.clone().unwrap_or(minted),
                title: draft.title.clone(),
                body: draft.body.clone(),
                author: "Owner".into(),
                image: draft.image.clone(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_post_saves_after_quiet_period_and_navigates() {
        let gateway = Arc::new(FakeGateway::default());
        let (autosaver, mut events) = Autosaver::open(gateway.clone(), None, DEFAULT_AUTOSAVE_DELAY)
            .await
            .unwrap();

        assert!(!autosaver.edit(Field::Title, "Hello").await);
        assert!(autosaver.edit(Field::Body, "W").await);
        assert!(autosaver.edit(Field::Body, "World").await);

        match events.recv().await {
            Some(AutosaveEvent::Saved(post)) => assert_eq!(post.body, "World"),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            events.recv().await,
            Some(AutosaveEvent::Navigate(Navigation::Replace("/write/p-1".into())))
        );
        assert_eq!(gateway.saves().len(), 1);
        assert_eq!(autosaver.route().await, "/write/p-1");

        autosaver.edit(Field::Title, "Hello again").await;
        assert!(matches!(events.recv().await, Some(AutosaveEvent::Saved(_))));
        let saves = gateway.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].id.as_deref(), Some("p-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_post_is_fetched_on_open() {
        let gateway = Arc::new(FakeGateway::default());
        let (autosaver, _events) =
            Autosaver::open(gateway.clone(), Some("abc"), DEFAULT_AUTOSAVE_DELAY)
                .await
                .unwrap();

        let draft = autosaver.draft().await;
        assert_eq!(draft.id.as_deref(), Some("abc"));
        assert_eq!(draft.title, "Stored");

        let err = Autosaver::open(gateway, Some("missing"), DEFAULT_AUTOSAVE_DELAY)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::MissingData));
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_skips_the_wait() {
        let gateway = Arc::new(FakeGateway::default());
        let (autosaver, mut events) =
            Autosaver::open(gateway.clone(), Some("abc"), Duration::from_secs(60))
                .await
                .unwrap();

        autosaver.edit(Field::Body, "Edited").await;
        let start = Instant::now();
        autosaver.publish().await.unwrap();

        assert!(matches!(events.recv().await, Some(AutosaveEvent::Saved(_))));
        assert!(start.elapsed() < Duration::from_secs(60));

        sleep(Duration::from_secs(120)).await;
        assert_eq!(gateway.saves().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_rejects_incomplete_draft() {
        let gateway = Arc::new(FakeGateway::default());
        let (autosaver, _events) = Autosaver::open(gateway.clone(), None, DEFAULT_AUTOSAVE_DELAY)
            .await
            .unwrap();

        autosaver.edit(Field::Title, "Only a title").await;
        let err = autosaver.publish().await.unwrap_err();

        assert!(matches!(err, ClientError::Incomplete(_)));
        assert!(gateway.saves().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_saves_wait_for_an_in_flight_create() {
        let gateway = Arc::new(FakeGateway::slow(Duration::from_millis(800)));
        let (autosaver, mut events) =
            Autosaver::open(gateway.clone(), None, Duration::from_millis(500))
                .await
                .unwrap();

        autosaver.edit(Field::Title, "Hello").await;
        autosaver.edit(Field::Body, "World").await;
        sleep(Duration::from_millis(600)).await;
        autosaver.edit(Field::Body, "World!").await;
        autosaver.publish().await.unwrap();

        assert!(matches!(events.recv().await, Some(AutosaveEvent::Saved(_))));
        assert!(matches!(events.recv().await, Some(AutosaveEvent::Navigate(_))));
        match events.recv().await {
            Some(AutosaveEvent::Saved(post)) => {
                assert_eq!(post.id, "p-1");
                assert_eq!(post.body, "World!");
            }
            other => panic!("unexpected event {other:?}"),
        }

        let ids: Vec<_> = gateway.saves().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![None, Some("p-1".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_saves_pending_edit_and_waits() {
        let gateway = Arc::new(FakeGateway::slow(Duration::from_secs(2)));
        let (autosaver, mut events) =
            Autosaver::open(gateway.clone(), Some("abc"), Duration::from_secs(60))
                .await
                .unwrap();

        autosaver.edit(Field::Body, "Last words").await;
        autosaver.close().await;

        let saves = gateway.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].body, "Last words");
        match events.try_recv() {
            Ok(AutosaveEvent::Saved(post)) => assert_eq!(post.id, "abc"),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events.recv().await, None);
    }
}

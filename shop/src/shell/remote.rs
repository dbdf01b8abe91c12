/// Remote views and their lazy loading
use super::context::AppContext;
use super::router::Route;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Text shown while a remote view is being loaded
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// An independently registered view module mounted by the shell
#[async_trait]
pub trait RemoteView: Send + Sync {
    fn name(&self) -> &'static str;

    /// Render the route using only the shared context
    async fn render(&self, ctx: &AppContext, route: &Route) -> anyhow::Result<String>;
}

pub type LoadFuture = Pin<Box<dyn Future<Output = anyhow::Result<Arc<dyn RemoteView>>> + Send>>;

/// Produces the view on first use
pub type RemoteLoader = Box<dyn Fn() -> LoadFuture + Send + Sync>;

/// Which routes a remote serves
pub type RouteMatcher = fn(&Route) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    NotLoaded,
    Loading,
    Ready,
}

/// A remote view that is loaded once, on the first navigation that needs it.
/// A failed load is not remembered; the next navigation tries again.
pub struct LazyRemote {
    name: &'static str,
    matcher: RouteMatcher,
    loader: RemoteLoader,
    view: OnceCell<Arc<dyn RemoteView>>,
    loading: AtomicBool,
}

impl LazyRemote {
    pub fn new<L, Fut>(name: &'static str, matcher: RouteMatcher, loader: L) -> Self
    where
        L: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Arc<dyn RemoteView>>> + Send + 'static,
    {
        LazyRemote {
            name,
            matcher,
            loader: Box::new(move || -> LoadFuture { Box::pin(loader()) }),
            view: OnceCell::new(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handles(&self, route: &Route) -> bool {
        (self.matcher)(route)
    }

    pub fn state(&self) -> RemoteState {
        if self.view.initialized() {
            RemoteState::Ready
        } else if self.loading.load(Ordering::SeqCst) {
            RemoteState::Loading
        } else {
            RemoteState::NotLoaded
        }
    }

    /// The loaded view, loading it first if needed
    pub async fn load(&self) -> anyhow::Result<Arc<dyn RemoteView>> {
        let view = self
            .view
            .get_or_try_init(|| async {
                info!(remote = self.name, "loading remote view");
                let _loading = LoadingFlag::raise(&self.loading);
                (self.loader)().await
            })
            .await?;
        Ok(Arc::clone(view))
    }
}

/// Lowers the loading flag when the load finishes or is cancelled
struct LoadingFlag<'a>(&'a AtomicBool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        LoadingFlag(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// All remotes known to the shell, looked up by route
#[derive(Default)]
pub struct RemoteRegistry {
    remotes: Vec<LazyRemote>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        RemoteRegistry::default()
    }

    pub fn register(&mut self, remote: LazyRemote) {
        debug!(remote = remote.name(), "registered remote view");
        self.remotes.push(remote);
    }

    pub fn with(mut self, remote: LazyRemote) -> Self {
        self.register(remote);
        self
    }

    /// First registered remote that serves the route
    pub fn resolve(&self, route: &Route) -> Option<&LazyRemote> {
        self.remotes.iter().find(|remote| remote.handles(route))
    }

    pub fn get(&self, name: &str) -> Option<&LazyRemote> {
        self.remotes.iter().find(|remote| remote.name() == name)
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

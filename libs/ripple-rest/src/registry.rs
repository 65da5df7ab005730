//! Registry of component handlers.
//!
//! One handler per [`ComponentKind`], created on first resolution and shared
//! through an `Arc` afterwards. The registry is an ordinary value: create
//! one per client (or per test) and pass it where it is needed.
//!
//! Notes:
//! - The first resolution of a kind fixes the handler's server URL. Later
//!   resolutions return the cached handler unchanged; re-point it explicitly
//!   with `set_server_url`.
//! - Lookup-or-create runs under a single mutex, so concurrent first
//!   resolutions of the same kind still produce one handler.
//! - [`ComponentRegistry::create_uncached`] builds a handler that is not
//!   shared, for callers that need a private server URL.

use crate::api::{
    AccountApi, NotificationApi, OrderApi, PaymentApi, StatusApi, TrustlineApi, UtilityApi,
};
use crate::config::RippleClientConfig;
use crate::dispatcher::RequestDispatcher;
use crate::error::Result;
use crate::kind::ComponentKind;
use crate::request::CallOptions;
use crate::transport::{HttpTransport, Transport};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A domain handler that can live in the registry.
pub trait ComponentApi: Send + Sync + Sized + 'static {
    const KIND: ComponentKind;

    fn new(dispatcher: RequestDispatcher) -> Self;

    fn dispatcher(&self) -> &RequestDispatcher;

    fn wrap(api: Arc<Self>) -> Component;

    fn extract(component: &Component) -> Option<Arc<Self>>;

    /// Re-point this handler; affects every holder of the same instance.
    fn set_server_url(&self, url: impl Into<String>) -> &Self {
        self.dispatcher().set_server_url(url);
        self
    }

    #[must_use]
    fn server_url(&self) -> String {
        self.dispatcher().server_url()
    }
}

/// A resolved handler of any kind.
#[derive(Debug, Clone)]
pub enum Component {
    Account(Arc<AccountApi>),
    Notification(Arc<NotificationApi>),
    Order(Arc<OrderApi>),
    Payment(Arc<PaymentApi>),
    Status(Arc<StatusApi>),
    Trustline(Arc<TrustlineApi>),
    Utility(Arc<UtilityApi>),
}

impl Component {
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Account(_) => ComponentKind::Account,
            Self::Notification(_) => ComponentKind::Notification,
            Self::Order(_) => ComponentKind::Order,
            Self::Payment(_) => ComponentKind::Payment,
            Self::Status(_) => ComponentKind::Status,
            Self::Trustline(_) => ComponentKind::Trustline,
            Self::Utility(_) => ComponentKind::Utility,
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &RequestDispatcher {
        match self {
            Self::Account(api) => api.dispatcher(),
            Self::Notification(api) => api.dispatcher(),
            Self::Order(api) => api.dispatcher(),
            Self::Payment(api) => api.dispatcher(),
            Self::Status(api) => api.dispatcher(),
            Self::Trustline(api) => api.dispatcher(),
            Self::Utility(api) => api.dispatcher(),
        }
    }

    /// Typed access to the handler, `None` if `T` is a different kind.
    #[must_use]
    pub fn downcast<T: ComponentApi>(&self) -> Option<Arc<T>> {
        T::extract(self)
    }

    pub fn set_server_url(&self, url: impl Into<String>) -> &Self {
        self.dispatcher().set_server_url(url);
        self
    }

    #[must_use]
    pub fn server_url(&self) -> String {
        self.dispatcher().server_url()
    }

    /// True when both point at the same handler instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dispatcher(), other.dispatcher())
    }
}

/// Process-local cache of component handlers sharing one transport.
pub struct ComponentRegistry {
    transport: Arc<dyn Transport>,
    options: CallOptions,
    cache: Mutex<HashMap<ComponentKind, Component>>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.cache.lock().keys().copied().collect();
        kinds.sort();
        f.debug_struct("ComponentRegistry")
            .field("options", &self.options)
            .field("cached", &kinds)
            .finish_non_exhaustive()
    }
}

impl ComponentRegistry {
    /// Registry over `transport` with default call options.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_options(transport, CallOptions::default())
    }

    #[must_use]
    pub fn with_options(transport: Arc<dyn Transport>, options: CallOptions) -> Self {
        Self {
            transport,
            options,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Registry backed by an [`HttpTransport`] built from `config`.
    ///
    /// # Errors
    /// Returns [`RippleError::Transport`](crate::RippleError::Transport) if
    /// the HTTP client cannot be built.
    pub fn from_config(config: &RippleClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_options(Arc::new(transport), config.call_options()))
    }

    /// Cached handler for `kind`, created and bound to `server_url` on first use.
    #[must_use]
    pub fn resolve(&self, kind: ComponentKind, server_url: &str) -> Component {
        match kind {
            ComponentKind::Account => Component::Account(self.api(server_url)),
            ComponentKind::Notification => Component::Notification(self.api(server_url)),
            ComponentKind::Order => Component::Order(self.api(server_url)),
            ComponentKind::Payment => Component::Payment(self.api(server_url)),
            ComponentKind::Status => Component::Status(self.api(server_url)),
            ComponentKind::Trustline => Component::Trustline(self.api(server_url)),
            ComponentKind::Utility => Component::Utility(self.api(server_url)),
        }
    }

    /// [`resolve`](Self::resolve) by component name.
    ///
    /// # Errors
    /// Returns [`RippleError::UnknownComponent`](crate::RippleError::UnknownComponent)
    /// for names outside the closed set.
    pub fn resolve_named(&self, name: &str, server_url: &str) -> Result<Component> {
        let kind: ComponentKind = name.parse()?;
        Ok(self.resolve(kind, server_url))
    }

    /// Typed form of [`resolve`](Self::resolve).
    #[must_use]
    pub fn api<T: ComponentApi>(&self, server_url: &str) -> Arc<T> {
        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(&T::KIND).and_then(T::extract) {
            return existing;
        }

        tracing::debug!(component = %T::KIND, server_url, "creating component handler");
        let api = Arc::new(T::new(self.dispatcher(server_url)));
        cache.insert(T::KIND, T::wrap(Arc::clone(&api)));
        api
    }

    /// A handler that is not cached and not shared with other callers.
    #[must_use]
    pub fn create_uncached<T: ComponentApi>(&self, server_url: &str) -> T {
        T::new(self.dispatcher(server_url))
    }

    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.cache.lock().contains_key(&kind)
    }

    /// Number of cached handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop every cached handler. `Arc`s already handed out stay valid.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    fn dispatcher(&self, server_url: &str) -> RequestDispatcher {
        RequestDispatcher::new(server_url, Arc::clone(&self.transport), self.options.clone())
    }
}

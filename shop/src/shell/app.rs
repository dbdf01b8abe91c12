/// The composition shell: routes, remotes and the shared context
use super::commands::{ShellCommand, HELP};
use super::context::AppContext;
use super::layout::Layout;
use super::remote::{LazyRemote, RemoteRegistry, RemoteState, RemoteView, LOADING_PLACEHOLDER};
use super::router::{Route, Router};
use super::views::{CartRemote, ProductsRemote};
use crate::application::use_cases::{AddProductToCart, ListCategories};
use crate::domain::value_objects::Price;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of one shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutput {
    /// A full page: header plus view body
    Render(String),
    /// A short status line
    Message(String),
    Quit,
}

/// Registry with the products and cart remotes
pub fn standard_remotes() -> RemoteRegistry {
    RemoteRegistry::new()
        .with(LazyRemote::new(
            ProductsRemote::NAME,
            ProductsRemote::handles,
            || async { Ok(Arc::new(ProductsRemote) as Arc<dyn RemoteView>) },
        ))
        .with(LazyRemote::new(
            CartRemote::NAME,
            CartRemote::handles,
            || async { Ok(Arc::new(CartRemote) as Arc<dyn RemoteView>) },
        ))
}

pub struct Shell {
    context: AppContext,
    router: Router,
    registry: RemoteRegistry,
    layout: Layout,
    current: Route,
}

impl Shell {
    pub fn new(context: AppContext, registry: RemoteRegistry) -> Self {
        let layout = Layout::new(context.cart());
        Shell {
            context,
            router: Router::new(),
            registry,
            layout,
            current: Route::home(),
        }
    }

    /// Shell with the standard remotes
    pub fn standard(context: AppContext) -> Self {
        Shell::new(context, standard_remotes())
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn registry(&self) -> &RemoteRegistry {
        &self.registry
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    /// Navigate to a path and render the page.
    /// `on_loading` receives the placeholder when the remote has to be loaded first.
    pub async fn navigate<F>(&mut self, path: &str, on_loading: F) -> String
    where
        F: FnOnce(&str),
    {
        let route = self.router.resolve(path);
        self.show(route, on_loading).await
    }

    async fn show<F>(&mut self, route: Route, on_loading: F) -> String
    where
        F: FnOnce(&str),
    {
        debug!(route = %route, "navigating");
        self.current = route.clone();

        let Some(remote) = self.registry.resolve(&route) else {
            return self.layout.render(&format!("Page not found: {}\n", route));
        };

        if remote.state() != RemoteState::Ready {
            on_loading(LOADING_PLACEHOLDER);
        }

        let body = match remote.load().await {
            Ok(view) => match view.render(&self.context, &route).await {
                Ok(body) => body,
                Err(e) => {
                    error!(remote = view.name(), error = %e, "view failed to render");
                    format!("Error: {}\n", e)
                }
            },
            Err(e) => {
                error!(remote = remote.name(), error = %e, "remote failed to load");
                format!("Error: {}\n", e)
            }
        };

        self.layout.render(&body)
    }

    /// Run one command
    pub async fn execute<F>(&mut self, command: ShellCommand, on_loading: F) -> ShellOutput
    where
        F: FnOnce(&str),
    {
        let cart = self.context.cart().clone();

        match command {
            ShellCommand::Go(path) => ShellOutput::Render(self.navigate(&path, on_loading).await),
            ShellCommand::Products => {
                ShellOutput::Render(self.show(Route::home(), on_loading).await)
            }
            ShellCommand::Category(category) => {
                let route = Route::Products {
                    category: Some(category),
                };
                ShellOutput::Render(self.show(route, on_loading).await)
            }
            ShellCommand::Product(id) => {
                ShellOutput::Render(self.show(Route::ProductDetail(id), on_loading).await)
            }
            ShellCommand::Cart => ShellOutput::Render(self.show(Route::Cart, on_loading).await),
            ShellCommand::Categories => {
                match ListCategories::new(self.context.catalog()).execute().await {
                    Ok(categories) => ShellOutput::Message(format!(
                        "Categories:\n{}",
                        categories
                            .iter()
                            .map(|c| format!("  {}", c))
                            .collect::<Vec<_>>()
                            .join("\n")
                    )),
                    Err(e) => ShellOutput::Message(format!("Error: {}", e)),
                }
            }
            ShellCommand::Add(id) => {
                match AddProductToCart::new(self.context.catalog(), &cart)
                    .execute(id)
                    .await
                {
                    Ok(line) => ShellOutput::Message(format!(
                        "Added {} (quantity {}). {}",
                        line.title(),
                        line.quantity(),
                        cart_status(&self.context)
                    )),
                    Err(e) => ShellOutput::Message(format!("Error: {}", e)),
                }
            }
            ShellCommand::Remove(id) => {
                cart.remove_item(id);
                ShellOutput::Message(cart_status(&self.context))
            }
            ShellCommand::Quantity(id, quantity) => {
                if quantity > 0 && cart.line(id).is_none() {
                    return ShellOutput::Message(format!(
                        "Product {} is not in the cart. {}",
                        id,
                        cart_status(&self.context)
                    ));
                }
                cart.update_quantity(id, quantity);
                ShellOutput::Message(cart_status(&self.context))
            }
            ShellCommand::Clear => {
                cart.clear();
                info!("cart cleared");
                ShellOutput::Message(cart_status(&self.context))
            }
            ShellCommand::Help => ShellOutput::Message(HELP.to_string()),
            ShellCommand::Quit => ShellOutput::Quit,
        }
    }
}

fn cart_status(context: &AppContext) -> String {
    let cart = context.cart();
    format!(
        "Cart: {} item(s), {}",
        cart.total_count(),
        Price::display(cart.total_price())
    )
}

//! Checkout screen.
//!
//! Owns the cart of one checkout session. Commands arrive one at a time from a
//! single reader, so the cart has exactly one owner.

use std::{fmt, str::FromStr, sync::Arc};

use rusty_money::iso::Currency;

use revenge::{Cart, CartError, CustomerInfo, PaymentMethod, ProductId, TaxRate};

use crate::{
    auth::{Screen, SessionManager},
    domain::{
        products::{ProductsStore, models::Product},
        result::{ActionFailure, ActionResult, FailureKind},
        sales::{SalesStore, models::Sale},
    },
    views::{format::money, notifications::Notifications},
};

/// One line typed at the checkout prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCommand {
    /// Look a barcode up and add one unit.
    Scan(String),
    /// Add units of a product by id.
    Add {
        /// Product to add
        product: ProductId,
        /// Units to add
        quantity: u32,
    },
    /// Set the quantity of a line; 0 removes it.
    Quantity {
        /// Line to change
        product: ProductId,
        /// New quantity
        quantity: u32,
    },
    /// One more unit of a line.
    Increment(ProductId),
    /// One unit less of a line.
    Decrement(ProductId),
    /// Drop a line.
    Remove(ProductId),
    /// Choose the payment method.
    Pay(PaymentMethod),
    /// `None` clears the customer.
    Customer(Option<CustomerInfo>),
    /// Print the cart.
    Show,
    /// Empty the cart.
    Clear,
    /// Register the sale.
    Submit,
    /// Print [`HELP`].
    Help,
    /// Leave the prompt.
    Quit,
}

/// Commands understood at the checkout prompt.
pub const HELP: &str = "\
scan <código>          agregar por código de barras
add <id> [cantidad]    agregar por id de producto
qty <id> <cantidad>    fijar cantidad (0 quita la línea)
inc <id> | dec <id>    sumar o restar una unidad
rm <id>                quitar la línea
pay <método>           efectivo, credito, debito, transferencia, yape, plin o 1-6
customer [doc] <nombre> datos del cliente; sin argumentos los borra
show | clear | submit | quit";

fn product_id(raw: Option<&str>) -> Result<ProductId, String> {
    raw.ok_or("falta el id del producto")?
        .parse::<u64>()
        .map(ProductId::new)
        .map_err(|_err| "id de producto inválido".to_string())
}

fn quantity(raw: Option<&str>) -> Result<u32, String> {
    raw.ok_or("falta la cantidad")?
        .parse()
        .map_err(|_err| "cantidad inválida".to_string())
}

/// Payment method by backend id or name, ignoring case and accents.
pub fn parse_payment_method(raw: &str) -> Option<PaymentMethod> {
    if let Ok(id) = raw.parse::<u8>() {
        return PaymentMethod::try_from(id).ok();
    }

    let method = match raw.to_lowercase().as_str() {
        "efectivo" | "cash" => PaymentMethod::Cash,
        "credito" | "crédito" | "tarjeta-credito" | "credit" => PaymentMethod::CreditCard,
        "debito" | "débito" | "tarjeta-debito" | "debit" => PaymentMethod::DebitCard,
        "transferencia" | "transfer" => PaymentMethod::Transfer,
        "yape" => PaymentMethod::Yape,
        "plin" => PaymentMethod::Plin,
        _ => return None,
    };

    Some(method)
}

fn customer(words: &[&str]) -> Option<CustomerInfo> {
    let (document, name) = match words.split_first() {
        None => return None,
        Some((first, rest))
            if !rest.is_empty() && first.chars().all(|c| c.is_ascii_digit()) =>
        {
            (Some((*first).to_string()), rest)
        }
        Some(_) => (None, words),
    };

    Some(CustomerInfo {
        name: name.join(" "),
        document,
    })
}

impl FromStr for CheckoutCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (verb, args) = words.split_first().ok_or("escriba un comando")?;
        let arg = |n: usize| args.get(n).copied();

        let command = match verb.to_lowercase().as_str() {
            "scan" => Self::Scan(arg(0).ok_or("falta el código")?.to_string()),
            "add" => Self::Add {
                product: product_id(arg(0))?,
                quantity: arg(1).map_or(Ok(1), |raw| quantity(Some(raw)))?,
            },
            "qty" => Self::Quantity {
                product: product_id(arg(0))?,
                quantity: quantity(arg(1))?,
            },
            "inc" => Self::Increment(product_id(arg(0))?),
            "dec" => Self::Decrement(product_id(arg(0))?),
            "rm" => Self::Remove(product_id(arg(0))?),
            "pay" => Self::Pay(
                arg(0)
                    .and_then(parse_payment_method)
                    .ok_or("método de pago desconocido")?,
            ),
            "customer" => Self::Customer(customer(args)),
            "show" => Self::Show,
            "clear" => Self::Clear,
            "submit" => Self::Submit,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("comando desconocido: {other}")),
        };

        Ok(command)
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Read the next command.
    Continue,
    /// Print the cart.
    ShowCart,
    /// Print [`HELP`].
    ShowHelp,
    /// The sale was registered; print its receipt.
    Submitted(Sale),
    /// Leave the prompt.
    Quit,
}

fn cart_failure(error: CartError) -> ActionFailure {
    ActionFailure::validation(error.to_string())
}

/// An open checkout: the cart plus the stores it reads from and submits to.
pub struct CheckoutSession {
    cart: Cart,
    products: Arc<ProductsStore>,
    sales: Arc<SalesStore>,
    session: Arc<SessionManager>,
    currency: &'static Currency,
    notifications: Notifications,
}

impl fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("cart", &self.cart)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

impl CheckoutSession {
    /// A checkout with an empty cart taxed at `tax_rate`.
    pub fn new(
        tax_rate: TaxRate,
        currency: &'static Currency,
        products: Arc<ProductsStore>,
        sales: Arc<SalesStore>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            cart: Cart::new(tax_rate),
            products,
            sales,
            session,
            currency,
            notifications: Notifications::default(),
        }
    }

    /// The cart being built.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Outcomes of the commands run so far.
    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    fn add_product(&mut self, product: &Product, quantity: u32) -> ActionResult<()> {
        if !product.status.is_active() {
            return Err(ActionFailure::validation(format!(
                "{} no está disponible para la venta",
                product.name
            )));
        }

        self.cart
            .add_item(&product.snapshot(), quantity)
            .map_err(cart_failure)
    }

    /// Add one unit of the product with `barcode`, looked up on the server so
    /// the stock ceiling is current.
    ///
    /// # Errors
    ///
    /// Returns the lookup failure or the cart's refusal.
    pub async fn scan(&mut self, barcode: &str) -> ActionResult<Product> {
        let product = self.products.search_by_barcode(barcode).await?;
        self.add_product(&product, 1)?;

        Ok(product)
    }

    /// Add `quantity` units of a product by id.
    ///
    /// # Errors
    ///
    /// Returns the lookup failure or the cart's refusal.
    pub async fn add(&mut self, product: ProductId, quantity: u32) -> ActionResult<Product> {
        let product = self.products.fetch_one(product).await?;
        self.add_product(&product, quantity)?;

        Ok(product)
    }

    /// Submit the cart as a sale by the logged-in cashier. The cart is cleared
    /// once the server has accepted the sale.
    ///
    /// # Errors
    ///
    /// Returns a failure if nobody allowed to sell is logged in, the cart is
    /// incomplete, or the server refuses the sale; the cart is left intact.
    /// A sale the server accepted with an unreadable answer also fails, but
    /// the cart is cleared so it cannot be charged twice.
    pub async fn submit(&mut self) -> ActionResult<Sale> {
        let cashier = self.session.authorize(Screen::Checkout)?;
        let payload = self.cart.to_checkout_payload().map_err(cart_failure)?;

        match self.sales.create(cashier.id, payload).await {
            Ok(sale) => {
                self.cart.clear();

                Ok(sale)
            }
            Err(failure) if failure.kind == FailureKind::Unconfirmed => {
                self.cart.clear();

                Err(ActionFailure {
                    kind: FailureKind::Unconfirmed,
                    message: format!(
                        "La venta fue registrada pero no se pudo leer la respuesta ({}). \
                         Revise el historial antes de volver a cobrar.",
                        failure.message
                    ),
                })
            }
            Err(failure) => Err(failure),
        }
    }

    /// Run one command. Outcomes are reported through [`Self::notifications`].
    pub async fn execute(&mut self, command: CheckoutCommand) -> Step {
        let result = match command {
            CheckoutCommand::Scan(barcode) => self
                .scan(&barcode)
                .await
                .map(|product| format!("{} agregado", product.name)),
            CheckoutCommand::Add { product, quantity } => self
                .add(product, quantity)
                .await
                .map(|product| format!("{quantity} x {} agregado", product.name)),
            CheckoutCommand::Quantity { product, quantity } => self
                .cart
                .set_quantity(product, quantity)
                .map(|()| "cantidad actualizada".to_string())
                .map_err(cart_failure),
            CheckoutCommand::Increment(product) => self
                .cart
                .increment(product)
                .map(|()| "cantidad actualizada".to_string())
                .map_err(cart_failure),
            CheckoutCommand::Decrement(product) => self
                .cart
                .decrement(product)
                .map(|()| "cantidad actualizada".to_string())
                .map_err(cart_failure),
            CheckoutCommand::Remove(product) => self
                .cart
                .remove_item(product)
                .map(|line| format!("{} quitado", line.name))
                .map_err(cart_failure),
            CheckoutCommand::Pay(method) => {
                self.cart.set_payment_method(method);
                Ok(format!("pago con {method}"))
            }
            CheckoutCommand::Customer(customer) => {
                let message = customer
                    .as_ref()
                    .map_or_else(|| "cliente borrado".to_string(), CustomerInfo::note);
                self.cart.set_customer_info(customer);
                Ok(message)
            }
            CheckoutCommand::Clear => {
                self.cart.clear();
                Ok("venta cancelada".to_string())
            }
            CheckoutCommand::Submit => {
                return match self.submit().await {
                    Ok(sale) => {
                        self.notifications.success(format!(
                            "Venta {} registrada por {}",
                            sale.receipt_number,
                            money(sale.total, self.currency)
                        ));
                        Step::Submitted(sale)
                    }
                    Err(failure) => {
                        self.notifications.failure(&failure);
                        Step::Continue
                    }
                };
            }
            CheckoutCommand::Show => return Step::ShowCart,
            CheckoutCommand::Help => return Step::ShowHelp,
            CheckoutCommand::Quit => return Step::Quit,
        };

        match result {
            Ok(message) => {
                self.notifications.success(message);
            }
            Err(failure) => {
                self.notifications.failure(&failure);
            }
        }

        Step::Continue
    }
}

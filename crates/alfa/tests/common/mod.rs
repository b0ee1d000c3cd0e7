//! Product sales fixtures shared by the integration tests.
//!
//! A salesperson sells a product to a client. Retail products can be sold by
//! anyone, corporate clients are covered by corporate sales only, and
//! corporate-only products are sold by corporate sales only.

#![allow(dead_code)]

use alfa::{Policy, ResolverRegistry, p, require};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub product_type: String,
    pub corporate_only: Option<bool>,
    pub quantity_available: Option<i32>,
    pub is_restricted: Option<bool>,
}

impl Product {
    pub fn named(product_type: &str) -> Self {
        Self {
            product_type: product_type.to_string(),
            ..Self::default()
        }
    }

    pub fn new(product_type: &str, corporate_only: bool, quantity: i32, restricted: bool) -> Self {
        Self {
            product_type: product_type.to_string(),
            corporate_only: Some(corporate_only),
            quantity_available: Some(quantity),
            is_restricted: Some(restricted),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientAccount {
    pub id: String,
    pub name: Option<String>,
    pub is_corporate: Option<bool>,
    pub account_type: Option<String>,
    pub credit_rating: Option<i32>,
    pub is_under_investigation: Option<bool>,
}

impl ClientAccount {
    pub fn named(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn new(
        id: &str,
        name: &str,
        is_corporate: bool,
        account_type: &str,
        credit_rating: i32,
        under_investigation: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            is_corporate: Some(is_corporate),
            account_type: Some(account_type.to_string()),
            credit_rating: Some(credit_rating),
            is_under_investigation: Some(under_investigation),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Employee {
    pub email: String,
    pub division: Option<String>,
}

impl Employee {
    pub fn named(email: &str) -> Self {
        Self {
            email: email.to_string(),
            division: None,
        }
    }

    pub fn new(email: &str, division: &str) -> Self {
        Self {
            email: email.to_string(),
            division: Some(division.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorpSalesArgs {
    pub employee: Employee,
    pub product: Option<Product>,
}

#[derive(Debug, Clone)]
pub struct CorpCoverageArgs {
    pub employee: Employee,
    pub customer: Option<ClientAccount>,
}

#[derive(Debug, Clone)]
pub struct ProductEligibility {
    pub customer: Option<ClientAccount>,
    pub product: Option<Product>,
    pub sales_person: Employee,
}

// ============================================================================
// Policies
// ============================================================================

pub fn retail_policy() -> Policy<Product> {
    Policy::builder()
        .hint("retail products are always allowed for order")
        .applicable_when_reversible(
            |p: &Product| Ok(p.corporate_only == Some(false)),
            |_, _| p("product.scope").is_not_in(["Corporate"]),
        )
        .permit()
        .build()
}

pub fn corporate_sales_policy() -> Policy<CorpSalesArgs> {
    Policy::builder()
        .hint("only sales from the Corporate Sales are allowed to sell corporate-only products")
        .applicable_when_reversible(
            |a: &CorpSalesArgs| Ok(require(&a.product, "product")?.corporate_only == Some(true)),
            |_, _| p("product.scope").is_in(["Corporate"]),
        )
        .reversible_condition(
            |a: &CorpSalesArgs| {
                Ok(a.employee.division.as_deref() == Some("CorpSales")
                    && require(&a.product, "product")?.corporate_only == Some(true))
            },
            "corporate-only products are sold by corp sales",
            |_, _| {
                p("employee.division")
                    .is_in(["CorpSales"])
                    .and(p("product.scope").is_in(["Corporate"]))
            },
        )
        .build()
}

pub fn corp_coverage_policy() -> Policy<CorpCoverageArgs> {
    Policy::builder()
        .hint("only corp sales can cover corp sales process")
        .applicable_when_reversible(
            |a: &CorpCoverageArgs| {
                let customer = require(&a.customer, "customer")?;
                Ok(*require(&customer.is_corporate, "client.isCorporate")?)
            },
            |_, _| p("client.type").eq("corporate"),
        )
        .condition(
            |a: &CorpCoverageArgs| Ok(a.employee.division.as_deref() == Some("CorpSales")),
            "the employee belongs to the corp sales dept",
        )
        .build()
}

pub fn product_sale_eligibility_policy() -> Policy<ProductEligibility> {
    Policy::builder()
        .hint("restricting sales permission")
        .first_applicable()
        .policy(retail_policy(), |e: &ProductEligibility| e.product.clone())
        .policy(corp_coverage_policy(), |e: &ProductEligibility| {
            Some(CorpCoverageArgs {
                employee: e.sales_person.clone(),
                customer: e.customer.clone(),
            })
        })
        .policy(corporate_sales_policy(), |e: &ProductEligibility| {
            Some(CorpSalesArgs {
                employee: e.sales_person.clone(),
                product: e.product.clone(),
            })
        })
        .build()
}

pub fn special_product_policy() -> Policy<Product> {
    Policy::builder()
        .hint("special products require additional checks")
        .applicable_when(|p: &Product| Ok(p.product_type == "special"))
        .permit_unless_deny()
        .condition(
            |p: &Product| Ok(*require(&p.quantity_available, "quantityAvailable")? > 0),
            "product must be in stock",
        )
        .condition(
            |p: &Product| Ok(p.is_restricted == Some(false)),
            "product must not be restricted",
        )
        .build()
}

pub fn premium_client_policy() -> Policy<ClientAccount> {
    Policy::builder()
        .hint("premium clients have fewer restrictions")
        .applicable_when(|c: &ClientAccount| Ok(c.account_type.as_deref() == Some("premium")))
        .deny_unless_permit()
        .condition(
            |c: &ClientAccount| Ok(*require(&c.credit_rating, "creditRating")? >= 700),
            "client must have good credit rating",
        )
        .build()
}

// ============================================================================
// Resolvers
// ============================================================================

fn product_catalog(product: &mut Product) {
    let known = match product.product_type.as_str() {
        "paper" => Product::new("paper", false, 100, false),
        "Product2" => Product::new("Product2", true, 50, true),
        "digital" => Product::new("digital", false, 200, false),
        "corporateKit" => Product::new("corporateKit", true, 20, true),
        "officeSupplies" => Product::new("officeSupplies", false, 150, false),
        _ => return,
    };
    *product = known;
}

fn client_directory(client: &mut ClientAccount) {
    let known = match client.id.as_str() {
        "BIGCORP" => ClientAccount::new("BIGCORP", "Big Inc", true, "corporate", 800, false),
        "Client2" => ClientAccount::new("Client2", "Client2", false, "standard", 600, true),
        "SMALLBIZ" => {
            ClientAccount::new("SMALLBIZ", "Small Business", false, "standard", 650, false)
        }
        "MIDCORP" => ClientAccount::new("MIDCORP", "Medium Corp", true, "corporate", 700, false),
        "STARTUP" => ClientAccount::new("STARTUP", "Startup Inc", false, "standard", 550, true),
        _ => return,
    };
    *client = known;
}

fn staff_directory(employee: &mut Employee) {
    let division = match employee.email.as_str() {
        "rockstar.salesperson@example.com" => "CorpSales",
        "Employee2" => "Division2",
        "junior.sales@example.com" => "RetailSales",
        "senior.manager@example.com" => "Management",
        "tech.support@example.com" => "TechSupport",
        _ => return,
    };
    employee.division = Some(division.to_string());
}

/// Resolves every entity from its directory.
pub fn default_resolver() -> ResolverRegistry {
    ResolverRegistry::new()
        .with(product_catalog)
        .with(client_directory)
        .with(staff_directory)
        .with(|e: &mut ProductEligibility| {
            if let Some(product) = e.product.as_mut() {
                product_catalog(product);
            }
            if let Some(customer) = e.customer.as_mut() {
                client_directory(customer);
            }
            staff_directory(&mut e.sales_person);
        })
}

/// Resolves employees only: products and clients live in the database being filtered.
pub fn reversal_resolver() -> ResolverRegistry {
    ResolverRegistry::new()
        .with(staff_directory)
        .with(|e: &mut ProductEligibility| staff_directory(&mut e.sales_person))
}

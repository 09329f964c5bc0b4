use clap::{Args, Subcommand};
use shopfront::catalog::{CategoryId, NewProduct, ProductId};
use shopfront_app::{
    catalog::{CatalogQuery, Deletion, ProductListing},
    context::AppContext,
    prompt::Confirm,
};

use crate::cli::{describe, table};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Manage categories
    #[command(subcommand)]
    Categories(CategoriesSubcommand),

    /// Manage products
    #[command(subcommand)]
    Products(ProductsSubcommand),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive name filter
    #[arg(long)]
    search: Option<String>,

    /// Sort by name
    #[arg(long)]
    sort: bool,
}

impl From<ListArgs> for CatalogQuery {
    fn from(args: ListArgs) -> Self {
        Self {
            search: args.search,
            sort_by_name: args.sort,
        }
    }
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    /// List categories
    List(ListArgs),

    /// Create a category
    Create {
        /// Display name
        #[arg(long)]
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category id
        id: CategoryId,

        /// New display name
        #[arg(long)]
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category id
        id: CategoryId,
    },
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Product type
    #[arg(long = "type", default_value = "")]
    kind: String,

    /// Localized price, e.g. `120.000đ`
    #[arg(long)]
    price: String,

    /// Image URI
    #[arg(long, default_value = "")]
    image: String,

    /// Owning category id
    #[arg(long)]
    category: CategoryId,
}

impl From<ProductArgs> for NewProduct {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            kind: args.kind,
            price: args.price,
            image: args.image,
            category_id: args.category,
        }
    }
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products
    List(ListArgs),

    /// Show one product
    Show {
        /// Product id
        id: ProductId,
    },

    /// Create a product
    Create(ProductArgs),

    /// Replace a product
    Update {
        /// Product id
        id: ProductId,

        #[command(flatten)]
        product: ProductArgs,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: ProductId,
    },
}

pub(crate) async fn run(
    command: CatalogCommand,
    context: &AppContext,
    confirm: &dyn Confirm,
) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Categories(command) => categories(command, context, confirm).await,
        CatalogSubcommand::Products(command) => products(command, context, confirm).await,
    }
}

async fn categories(
    command: CategoriesSubcommand,
    context: &AppContext,
    confirm: &dyn Confirm,
) -> Result<(), String> {
    let catalog = context.catalog();

    match command {
        CategoriesSubcommand::List(args) => {
            let categories = catalog
                .categories(&args.into())
                .await
                .map_err(|error| format!("failed to list categories: {}", describe(&error)))?;

            println!(
                "{}",
                table::render(
                    ["ID", "Name"],
                    categories
                        .into_iter()
                        .map(|category| [category.id.into_string(), category.name]),
                    0..1,
                )
            );
        }
        CategoriesSubcommand::Create { name } => {
            let category = catalog
                .create_category(&name)
                .await
                .map_err(|error| format!("failed to create category: {}", describe(&error)))?;

            println!("category_id: {}", category.id);
        }
        CategoriesSubcommand::Rename { id, name } => {
            let category = catalog
                .rename_category(&id, &name)
                .await
                .map_err(|error| format!("failed to rename category: {}", describe(&error)))?;

            println!("category {} renamed to {}", category.id, category.name);
        }
        CategoriesSubcommand::Delete { id } => {
            let deletion = catalog
                .delete_category(&id, confirm)
                .await
                .map_err(|error| format!("failed to delete category: {}", describe(&error)))?;

            report(deletion, &format!("category {id}"));
        }
    }

    Ok(())
}

async fn products(
    command: ProductsSubcommand,
    context: &AppContext,
    confirm: &dyn Confirm,
) -> Result<(), String> {
    let catalog = context.catalog();

    match command {
        ProductsSubcommand::List(args) => {
            let listings = catalog
                .products(&args.into())
                .await
                .map_err(|error| format!("failed to list products: {}", describe(&error)))?;

            println!("{}", render(&listings));
        }
        ProductsSubcommand::Show { id } => {
            let listing = catalog
                .product(&id)
                .await
                .map_err(|error| format!("failed to load product: {}", describe(&error)))?;

            println!("product_id: {}", listing.product.id);
            println!("name: {}", listing.product.name);
            println!("type: {}", listing.product.kind_label());
            println!("price: {}", listing.product.price);
            println!("category: {}", listing.category);
            println!("image: {}", listing.product.image);
        }
        ProductsSubcommand::Create(args) => {
            let product = catalog
                .create_product(&args.into())
                .await
                .map_err(|error| format!("failed to create product: {}", describe(&error)))?;

            println!("product_id: {}", product.id);
        }
        ProductsSubcommand::Update { id, product } => {
            let product = catalog
                .update_product(&id, &product.into())
                .await
                .map_err(|error| format!("failed to update product: {}", describe(&error)))?;

            println!("product {} updated", product.id);
        }
        ProductsSubcommand::Delete { id } => {
            let deletion = catalog
                .delete_product(&id, confirm)
                .await
                .map_err(|error| format!("failed to delete product: {}", describe(&error)))?;

            report(deletion, &format!("product {id}"));
        }
    }

    Ok(())
}

fn render(listings: &[ProductListing]) -> String {
    table::render(
        ["ID", "Name", "Type", "Price", "Category"],
        listings.iter().map(|listing| {
            [
                listing.product.id.to_string(),
                listing.product.name.clone(),
                listing.product.kind_label().to_string(),
                listing.product.price.clone(),
                listing.category.clone(),
            ]
        }),
        3..4,
    )
}

fn report(deletion: Deletion, what: &str) {
    match deletion {
        Deletion::Cancelled => println!("cancelled"),
        Deletion::Deleted => println!("{what} deleted"),
    }
}

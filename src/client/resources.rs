//! The resource table.
//!
//! Each API resource is described once: where it lives, how many parent ids address it,
//! what its list response looks like, and which operations the server supports for it.
//! Support is expressed with marker traits so that, for example, searching recipes or
//! checking whether a webhook exists does not compile.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::*;

/// Path layout of a resource.
///
/// A resource nested under `recipes/{id}/recipe_steps/{id}` has
/// `parents = ["recipes", "recipe_steps"]`; its parent ids are interleaved after each name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub parents: &'static [&'static str],
    pub collection: &'static [&'static str],
    pub versioned: bool,
}

impl Endpoint {
    pub const fn versioned(parents: &'static [&'static str], collection: &'static [&'static str]) -> Self {
        Self {
            parents,
            collection,
            versioned: true,
        }
    }

    pub const fn versionless(collection: &'static [&'static str]) -> Self {
        Self {
            parents: &[],
            collection,
            versioned: false,
        }
    }

    /// Path segments below the version prefix, parents first.
    pub fn segments(&self, parent_ids: &[u64], tail: &[String]) -> Vec<String> {
        let mut segments = Vec::with_capacity(self.parents.len() * 2 + self.collection.len() + tail.len());

        for (name, id) in self.parents.iter().zip(parent_ids) {
            segments.push((*name).to_string());
            segments.push(id.to_string());
        }
        segments.extend(self.collection.iter().map(|s| (*s).to_string()));
        segments.extend(tail.iter().cloned());

        segments
    }
}

/// Parent ids in path order. Implemented for `[u64; N]`.
pub trait ParentIds: Copy + Send + Sync {
    const ARITY: usize;

    fn ids(&self) -> &[u64];
}

impl<const N: usize> ParentIds for [u64; N] {
    const ARITY: usize = N;

    fn ids(&self) -> &[u64] {
        self
    }
}

/// An addressable API resource. Every resource supports get, list and archive.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    type Parents: ParentIds;
    type List: DeserializeOwned + Send;

    const ENDPOINT: Endpoint;

    fn id(&self) -> u64;
}

/// Supports `HEAD` existence checks.
pub trait Existable: Resource {}

/// Supports `POST` creation.
pub trait Creatable: Resource {
    type CreationInput: Serialize + Send + Sync;
}

/// Supports `PUT` updates.
pub trait Updatable: Resource {}

/// Supports `GET .../search?q=&limit=`.
pub trait Searchable: Resource {}

macro_rules! resource {
    (
        $model:ident {
            list: $list:ty,
            parents: $arity:literal,
            endpoint: $endpoint:expr,
            $(create: $input:ty,)?
            supports: [$($marker:ident),* $(,)?] $(,)?
        }
    ) => {
        impl Resource for $model {
            type Parents = [u64; $arity];
            type List = $list;

            const ENDPOINT: Endpoint = $endpoint;

            fn id(&self) -> u64 {
                self.id
            }
        }

        $(
            impl Creatable for $model {
                type CreationInput = $input;
            }
        )?

        $(impl $marker for $model {})*
    };
}

resource!(ValidInstrument {
    list: ValidInstrumentList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["valid_instruments"]),
    create: ValidInstrumentCreationInput,
    supports: [Existable, Updatable, Searchable],
});

resource!(ValidIngredient {
    list: ValidIngredientList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["valid_ingredients"]),
    create: ValidIngredientCreationInput,
    supports: [Existable, Updatable, Searchable],
});

resource!(ValidPreparation {
    list: ValidPreparationList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["valid_preparations"]),
    create: ValidPreparationCreationInput,
    supports: [Existable, Updatable, Searchable],
});

resource!(ValidIngredientTag {
    list: ValidIngredientTagList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["valid_ingredient_tags"]),
    create: ValidIngredientTagCreationInput,
    supports: [Existable, Updatable],
});

resource!(IngredientTagMapping {
    list: IngredientTagMappingList,
    parents: 1,
    endpoint: Endpoint::versioned(&["valid_ingredients"], &["ingredient_tag_mappings"]),
    create: IngredientTagMappingCreationInput,
    supports: [Existable, Updatable],
});

resource!(ValidIngredientPreparation {
    list: ValidIngredientPreparationList,
    parents: 1,
    endpoint: Endpoint::versioned(&["valid_ingredients"], &["valid_ingredient_preparations"]),
    create: ValidIngredientPreparationCreationInput,
    supports: [Existable, Updatable],
});

resource!(RequiredPreparationInstrument {
    list: RequiredPreparationInstrumentList,
    parents: 1,
    endpoint: Endpoint::versioned(&["valid_preparations"], &["required_preparation_instruments"]),
    create: RequiredPreparationInstrumentCreationInput,
    supports: [Existable, Updatable],
});

resource!(Recipe {
    list: RecipeList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["recipes"]),
    create: RecipeCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeTag {
    list: RecipeTagList,
    parents: 1,
    endpoint: Endpoint::versioned(&["recipes"], &["recipe_tags"]),
    create: RecipeTagCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStep {
    list: RecipeStepList,
    parents: 1,
    endpoint: Endpoint::versioned(&["recipes"], &["recipe_steps"]),
    create: RecipeStepCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStepPreparation {
    list: RecipeStepPreparationList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_steps"], &["recipe_step_preparations"]),
    create: RecipeStepPreparationCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStepIngredient {
    list: RecipeStepIngredientList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_steps"], &["recipe_step_ingredients"]),
    create: RecipeStepIngredientCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStepInstrument {
    list: RecipeStepInstrumentList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_steps"], &["recipe_step_instruments"]),
    create: RecipeStepInstrumentCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStepProduct {
    list: RecipeStepProductList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_steps"], &["recipe_step_products"]),
    create: RecipeStepProductCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeStepEvent {
    list: RecipeStepEventList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_steps"], &["recipe_step_events"]),
    create: RecipeStepEventCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeIteration {
    list: RecipeIterationList,
    parents: 1,
    endpoint: Endpoint::versioned(&["recipes"], &["recipe_iterations"]),
    create: RecipeIterationCreationInput,
    supports: [Existable, Updatable],
});

resource!(RecipeIterationStep {
    list: RecipeIterationStepList,
    parents: 1,
    endpoint: Endpoint::versioned(&["recipes"], &["recipe_iteration_steps"]),
    create: RecipeIterationStepCreationInput,
    supports: [Existable, Updatable],
});

resource!(IterationMedia {
    list: IterationMediaList,
    parents: 2,
    endpoint: Endpoint::versioned(&["recipes", "recipe_iterations"], &["iteration_medias"]),
    create: IterationMediaCreationInput,
    supports: [Existable, Updatable],
});

resource!(Invitation {
    list: InvitationList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["invitations"]),
    create: InvitationCreationInput,
    supports: [Existable, Updatable],
});

resource!(Report {
    list: ReportList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["reports"]),
    create: ReportCreationInput,
    supports: [Existable, Updatable],
});

resource!(Webhook {
    list: WebhookList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["webhooks"]),
    create: WebhookCreationInput,
    supports: [Updatable],
});

// Created through the session-cookie handshake, see `PrixfixeClient::create_oauth2_client`.
resource!(OAuth2Client {
    list: OAuth2ClientList,
    parents: 0,
    endpoint: Endpoint::versioned(&[], &["oauth2", "clients"]),
    supports: [],
});

// Created through `PrixfixeClient::create_user`.
resource!(User {
    list: UserList,
    parents: 0,
    endpoint: Endpoint::versionless(&["users"]),
    supports: [],
});

//! # Vocabulary
//!
//! IRIs the builders emit. Domain ontologies (entity types, event roles)
//! are not here: callers supply those as opaque nodes.

/// RDF syntax vocabulary used for typing and reification.
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
}

/// XML Schema datatypes for typed literals.
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
}

/// SKOS, registered for taxonomy labels in dumps.
pub mod skos {
    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";
}

/// The AIDA interchange ontology.
pub mod aida {
    pub const NAMESPACE: &str =
        "https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/InterchangeOntology#";

    macro_rules! terms {
        ($($name:ident => $local:literal),* $(,)?) => {
            $(
                pub const $name: &str = concat!(
                    "https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/InterchangeOntology#",
                    $local
                );
            )*
        };
    }

    // Classes
    terms! {
        AUDIO_JUSTIFICATION => "AudioJustification",
        BOUNDING_BOX => "BoundingBox",
        CLUSTER_MEMBERSHIP => "ClusterMembership",
        COMPOUND_JUSTIFICATION => "CompoundJustification",
        CONFIDENCE_CLASS => "Confidence",
        ENTITY => "Entity",
        EVENT => "Event",
        HYPOTHESIS => "Hypothesis",
        IMAGE_JUSTIFICATION => "ImageJustification",
        KEY_FRAME_VIDEO_JUSTIFICATION => "KeyFrameVideoJustification",
        LINK_ASSERTION => "LinkAssertion",
        MUTUAL_EXCLUSION => "MutualExclusion",
        MUTUAL_EXCLUSION_ALTERNATIVE => "MutualExclusionAlternative",
        PRIVATE_DATA => "PrivateData",
        RELATION => "Relation",
        SAME_AS_CLUSTER => "SameAsCluster",
        SHOT_VIDEO_JUSTIFICATION => "ShotVideoJustification",
        SUBGRAPH => "Subgraph",
        SYSTEM => "System",
        TEXT_JUSTIFICATION => "TextJustification",
    }

    // Properties
    terms! {
        ALTERNATIVE => "alternative",
        ALTERNATIVE_GRAPH => "alternativeGraph",
        BOUNDING_BOX_PROPERTY => "boundingBox",
        BOUNDING_BOX_LOWER_RIGHT_X => "boundingBoxLowerRightX",
        BOUNDING_BOX_LOWER_RIGHT_Y => "boundingBoxLowerRightY",
        BOUNDING_BOX_UPPER_LEFT_X => "boundingBoxUpperLeftX",
        BOUNDING_BOX_UPPER_LEFT_Y => "boundingBoxUpperLeftY",
        CLUSTER => "cluster",
        CLUSTER_MEMBER => "clusterMember",
        CONFIDENCE => "confidence",
        CONFIDENCE_VALUE => "confidenceValue",
        CONTAINED_JUSTIFICATION => "containedJustification",
        DEPENDS_ON_HYPOTHESIS => "dependsOnHypothesis",
        END_OFFSET_INCLUSIVE => "endOffsetInclusive",
        END_TIMESTAMP => "endTimestamp",
        HAS_NAME => "hasName",
        HYPOTHESIS_CONTENT => "hypothesisContent",
        JSON_CONTENT => "jsonContent",
        JUSTIFIED_BY => "justifiedBy",
        KEY_FRAME => "keyFrame",
        LINK => "link",
        LINK_TARGET => "linkTarget",
        NONE_OF_THE_ABOVE => "noneOfTheAbove",
        NUMERIC_VALUE => "numericValue",
        PRIVATE_DATA_PROPERTY => "privateData",
        PROTOTYPE => "prototype",
        SHOT => "shot",
        SOURCE => "source",
        START_OFFSET => "startOffset",
        START_TIMESTAMP => "startTimestamp",
        SUBGRAPH_CONTAINS => "subgraphContains",
        SYSTEM_PROPERTY => "system",
        TEXT_VALUE => "textValue",
    }
}

/// Prefixes registered by `resources::add_standard_namespaces`.
pub const STANDARD_PREFIXES: [(&str, &str); 4] = [
    ("rdf", rdf::NAMESPACE),
    ("xsd", xsd::NAMESPACE),
    ("aida", aida::NAMESPACE),
    ("skos", skos::NAMESPACE),
];

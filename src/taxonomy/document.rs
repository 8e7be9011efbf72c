// Document: the classified output of the extraction stage for one text.
//
// Holds the taxonomy classes referenced anywhere in the document (keyed by
// label) and the extracted objects (keyed by label). Both keep insertion
// order so every ranking tie-break downstream is deterministic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::node::TaxonomyNode;
use super::object::TaxonomyObject;

/// Object weights below this are too small to normalize against.
const MIN_COMPOSITE_WEIGHT: f32 = 1e-8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "DocumentRecord")]
pub struct Document {
    classes: Vec<TaxonomyNode>,
    objects: Vec<TaxonomyObject>,
}

/// Wire form of a document; labels may repeat until folded into a Document.
#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    classes: Vec<TaxonomyNode>,
    #[serde(default)]
    objects: Vec<TaxonomyObject>,
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        let mut document = Document::new();
        for class in record.classes {
            document.add_class(class);
        }
        for object in record.objects {
            document.add_object(object);
        }
        document
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from its objects, registering every lineage node
    /// as a class. The first occurrence of a label defines the class.
    pub fn from_objects(objects: Vec<TaxonomyObject>) -> Self {
        let mut document = Document::new();
        for object in objects {
            for lineage in object.lineages() {
                for node in lineage.nodes() {
                    if document.class(&node.label).is_none() {
                        document.classes.push(node.clone());
                    }
                }
            }
            document.add_object(object);
        }
        document
    }

    /// Register a class, replacing any class with the same label in place.
    pub fn add_class(&mut self, node: TaxonomyNode) {
        match self.classes.iter_mut().find(|c| c.label == node.label) {
            Some(existing) => *existing = node,
            None => self.classes.push(node),
        }
    }

    /// Register an object, replacing any object with the same label in place.
    pub fn add_object(&mut self, object: TaxonomyObject) {
        match self.objects.iter_mut().find(|o| o.label() == object.label()) {
            Some(existing) => *existing = object,
            None => self.objects.push(object),
        }
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> &[TaxonomyNode] {
        &self.classes
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[TaxonomyObject] {
        &self.objects
    }

    pub fn class(&self, label: &str) -> Option<&TaxonomyNode> {
        self.classes.iter().find(|c| c.label == label)
    }

    pub fn object(&self, label: &str) -> Option<&TaxonomyObject> {
        self.objects.iter().find(|o| o.label() == label)
    }

    /// Label → class lookup over the classes map.
    pub fn classes_map(&self) -> HashMap<&str, &TaxonomyNode> {
        self.classes.iter().map(|c| (c.label.as_str(), c)).collect()
    }

    pub fn is_classified(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Propagate object weights down their lineages (Kirchhoff's current law).
    ///
    /// Each object weight is normalized by the heaviest object in the
    /// document, then split evenly across the object's lineages and added
    /// to every class on those lineages. Classes shared between objects
    /// accumulate. Class weights (and their lineage copies) are finally
    /// divided by the heaviest class, so they end up in [0, 1].
    ///
    /// Returns the heaviest class weight before that last step, or `None`
    /// when no object carries enough weight to normalize against.
    pub fn apply_kirchoff(&mut self) -> Option<f32> {
        let max_weight = self
            .objects
            .iter()
            .map(|o| o.weight())
            .fold(f32::MIN, f32::max);

        if self.objects.is_empty() || max_weight <= MIN_COMPOSITE_WEIGHT {
            return None;
        }

        let mut class_weights: HashMap<String, f32> = self
            .classes
            .iter()
            .map(|c| (c.label.clone(), c.weight))
            .collect();

        for object in &mut self.objects {
            object.node.weight /= max_weight;
            if object.lineages.is_empty() {
                continue;
            }
            let share = object.node.weight / object.lineages.len() as f32;

            for lineage in &object.lineages {
                for node in lineage.nodes() {
                    *class_weights.entry(node.label.clone()).or_insert(0.0) += share;
                }
            }
        }

        // Sync the classes map and every lineage copy with the propagated weights
        for object in &mut self.objects {
            for lineage in &mut object.lineages {
                for node in lineage.nodes_mut() {
                    if let Some(&weight) = class_weights.get(&node.label) {
                        node.weight = weight;
                    }
                }
            }
        }
        for object in &self.objects {
            for lineage in object.lineages() {
                for node in lineage.nodes() {
                    if self.class(&node.label).is_none() {
                        self.classes.push(node.clone());
                    }
                }
            }
        }
        for class in &mut self.classes {
            if let Some(&weight) = class_weights.get(&class.label) {
                class.weight = weight;
            }
        }

        let max_class_weight = self
            .classes
            .iter()
            .map(|c| c.weight)
            .fold(f32::MIN_POSITIVE, f32::max);

        if max_class_weight > MIN_COMPOSITE_WEIGHT {
            for class in &mut self.classes {
                class.weight /= max_class_weight;
            }
            for object in &mut self.objects {
                for lineage in &mut object.lineages {
                    for node in lineage.nodes_mut() {
                        node.weight /= max_class_weight;
                    }
                }
            }
        }

        debug!(
            objects = self.objects.len(),
            classes = self.classes.len(),
            max_class_weight,
            "Propagated object weights along lineages"
        );

        Some(max_class_weight)
    }
}

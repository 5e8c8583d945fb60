//! Product gallery selection

use serde::Serialize;
use crate::{ProductImage, Result, StorefrontError};

/// Which product image is in the main slot. Purely local display state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<ProductImage>,
    active: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail<'a> {
    pub index: usize,
    pub image: &'a ProductImage,
    pub is_active: bool,
}

impl Gallery {
    /// Starts on the variant image when the gallery contains it, else the first image.
    pub fn new(images: Vec<ProductImage>, variant_image: Option<&ProductImage>) -> Self {
        let active = variant_image.and_then(|v| position_of(&images, v)).unwrap_or(0);
        Self { images, active }
    }

    pub fn images(&self) -> &[ProductImage] { &self.images }
    pub fn is_empty(&self) -> bool { self.images.is_empty() }
    pub fn active_index(&self) -> Option<usize> { (!self.images.is_empty()).then_some(self.active) }
    pub fn active(&self) -> Option<&ProductImage> { self.images.get(self.active) }

    pub fn select(&mut self, index: usize) -> Result<&ProductImage> {
        let len = self.images.len();
        if index >= len {
            return Err(StorefrontError::ImageIndexOutOfRange { index, len });
        }
        self.active = index;
        Ok(&self.images[index])
    }

    /// Follows a variant change. Images outside the gallery are ignored.
    pub fn sync_variant_image(&mut self, variant_image: Option<&ProductImage>) {
        if let Some(index) = variant_image.and_then(|v| position_of(&self.images, v)) {
            self.active = index;
        }
    }

    pub fn thumbnails(&self) -> Vec<Thumbnail<'_>> {
        if self.images.len() < 2 { return vec![]; }
        self.images.iter().enumerate()
            .map(|(index, image)| Thumbnail { index, image, is_active: index == self.active })
            .collect()
    }

    /// `"2 / 5"` style position, only for multi-image galleries.
    pub fn counter(&self) -> Option<String> {
        (self.images.len() > 1).then(|| format!("{} / {}", self.active + 1, self.images.len()))
    }
}

fn position_of(images: &[ProductImage], target: &ProductImage) -> Option<usize> {
    images.iter().position(|i| i.id == target.id)
}

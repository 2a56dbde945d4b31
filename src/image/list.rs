// quickmagick/src/image/list.rs
use super::ops::{Operation, Step, Transform};
use super::{in_place_arguments, Image};
use crate::core::magick::{Magick, Tool};
use crate::core::{MagickError, Result};
use crate::command::escape;
use std::any::Any;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// What can be appended to an [`ImageList`].
pub enum Members {
    One(Image),
    Many(Vec<Image>),
}

impl From<Image> for Members {
    fn from(image: Image) -> Self {
        Members::One(image)
    }
}

impl From<Vec<Image>> for Members {
    fn from(images: Vec<Image>) -> Self {
        Members::Many(images)
    }
}

impl From<ImageList> for Members {
    fn from(list: ImageList) -> Self {
        Members::Many(list.images)
    }
}

/// Ordered images saved together into one multi-frame output. Every
/// [`Transform`] edit is applied to all members in order.
#[derive(Debug, Clone, Default)]
pub struct ImageList {
    images: Vec<Image>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every source; multi-frame files contribute one image per frame.
    pub fn open<P: AsRef<Path>>(magick: &Magick, sources: &[P]) -> Result<Self> {
        let mut list = Self::new();
        for source in sources {
            list.append(magick.read(source)?);
        }
        Ok(list)
    }

    pub fn append(&mut self, members: impl Into<Members>) -> &mut Self {
        match members.into() {
            Members::One(image) => self.images.push(image),
            Members::Many(images) => self.images.extend(images),
        }
        self
    }

    /// Dynamically typed append: accepts an `Image`, an `ImageList` or a
    /// `Vec<Image>`.
    pub fn append_any(&mut self, item: Box<dyn Any>) -> Result<&mut Self> {
        let item = match item.downcast::<Image>() {
            Ok(image) => return Ok(self.append(*image)),
            Err(item) => item,
        };
        let item = match item.downcast::<ImageList>() {
            Ok(list) => return Ok(self.append(*list)),
            Err(item) => item,
        };
        match item.downcast::<Vec<Image>>() {
            Ok(images) => Ok(self.append(*images)),
            Err(_) => Err(MagickError::InvalidAppendArgument(
                "expected Image, ImageList or Vec<Image>".to_string(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Image> {
        self.images.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.images.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Image> {
        self.images.iter_mut()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn into_images(self) -> Vec<Image> {
        self.images
    }

    /// Member fragments, space separated, each in its own parentheses.
    pub fn command_line(&self) -> String {
        self.images
            .iter()
            .map(Image::command_line)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn magick(&self) -> Result<&Magick> {
        self.images
            .first()
            .map(|image| &image.magick)
            .ok_or_else(|| MagickError::InvalidParameter("Image list is empty".to_string()))
    }

    /// One `convert` call writing every member into `output`.
    pub fn save(&self, output: impl AsRef<Path>) -> Result<String> {
        let output = output.as_ref().to_string_lossy().into_owned();
        let args = format!("{} {}", self.command_line(), escape(&output));
        let stdout = self.magick()?.run(Tool::Convert, &args)?;
        log::info!("Saved {} images to {}", self.images.len(), output);
        Ok(stdout)
    }

    pub fn write(&self, output: impl AsRef<Path>) -> Result<String> {
        self.save(output)
    }

    /// Rewrites every member's source file. Members sharing a file are
    /// written back in a single invocation, each frame with its own edits.
    pub fn save_in_place(&mut self) -> Result<()> {
        if self.images.iter().any(Image::is_synthetic) {
            return Err(MagickError::CannotMogrifySynthetic);
        }

        // member indices per source file, in order of first appearance
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (index, image) in self.images.iter().enumerate() {
            match groups.iter_mut().find(|(source, _)| *source == image.source) {
                Some((_, indices)) => indices.push(index),
                None => groups.push((image.source.clone(), vec![index])),
            }
        }

        for (source, indices) in groups {
            let members: Vec<&Image> = indices.iter().map(|&index| &self.images[index]).collect();
            let (tool, args) = in_place_arguments(&members);
            members[0].magick.run(tool, &args)?;
            log::info!("Rewrote {} frame(s) in place: {}", indices.len(), source);

            for index in indices {
                self.images[index].forget_edits();
            }
        }
        Ok(())
    }
}

impl Transform for ImageList {
    fn apply(&mut self, operation: Operation) -> Result<&mut Self> {
        let step = operation.resolve()?;
        if step == Step::Revert && self.images.iter().any(Image::is_synthetic) {
            return Err(MagickError::CannotRevertSynthetic);
        }
        for image in &mut self.images {
            image.push(&step)?;
        }
        Ok(self)
    }
}

impl Index<usize> for ImageList {
    type Output = Image;

    fn index(&self, index: usize) -> &Image {
        &self.images[index]
    }
}

impl IndexMut<usize> for ImageList {
    fn index_mut(&mut self, index: usize) -> &mut Image {
        &mut self.images[index]
    }
}

impl IntoIterator for ImageList {
    type Item = Image;
    type IntoIter = std::vec::IntoIter<Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a mut ImageList {
    type Item = &'a mut Image;
    type IntoIter = std::slice::IterMut<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::tests::MockExecutor;
    use std::sync::Arc;

    fn two_frames(magick: &Magick) -> ImageList {
        let mut list = ImageList::new();
        list.append(Image::new(
            magick,
            "multipage.tif",
            0,
            Some("multipage.tif[0] TIFF 100x100 100x100+0+0 8-bit sRGB 12c 10KB"),
            false,
        ));
        list.append(Image::new(
            magick,
            "multipage.tif",
            1,
            Some("multipage.tif[1] TIFF 464x300 464x300+0+0 8-bit sRGB 80c 10KB"),
            false,
        ));
        list
    }

    #[test]
    fn open_expands_frames_in_order() {
        let mock = Arc::new(MockExecutor::with_stdout(&[
            "a.png PNG 10x10 10x10+0+0 8-bit sRGB 2c 1KB\n",
            "b.tif[0] TIFF 20x20 20x20+0+0 8-bit sRGB 2c 1KB\nb.tif[1] TIFF 30x30 30x30+0+0 8-bit sRGB 2c 1KB\n",
        ]));
        let magick = Magick::new().with_executor(mock.clone());
        let list = ImageList::open(&magick, &["a.png", "b.tif"]).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].source(), "a.png");
        assert_eq!((list[1].source(), list[1].frame()), ("b.tif", 0));
        assert_eq!((list[2].source(), list[2].frame()), ("b.tif", 1));
        assert_eq!(list[2].width().unwrap(), Some(30));
        assert_eq!(mock.get_calls(), vec!["identify a.png", "identify b.tif"]);
    }

    #[test]
    fn frames_are_independent() {
        let magick = Magick::new();
        let mut list = two_frames(&magick);
        assert_eq!(list[0].width().unwrap(), Some(100));
        assert_eq!(list[1].width().unwrap(), Some(464));

        list[0].resize("50x50!").unwrap();
        assert_eq!(list[0].operators().len(), 1);
        assert!(list[1].operators().is_empty());
    }

    #[test]
    fn edits_are_broadcast() {
        let magick = Magick::new();
        let mut list = two_frames(&magick);
        list.resize("50x50!").unwrap().draw_line(0, 0, 1, 1).unwrap();

        for image in &list {
            let names: Vec<&str> = image.operators().iter().map(|a| a.name()).collect();
            assert_eq!(names, ["resize", "draw"]);
        }
    }

    #[test]
    fn invalid_broadcast_touches_nobody() {
        let magick = Magick::new();
        let mut list = two_frames(&magick);
        assert!(list.draw_polyline(&[1.0, 2.0, 3.0]).is_err());
        assert!(list.iter().all(|image| image.operators().is_empty()));
    }

    #[test]
    fn save_is_one_merged_convert() {
        let mock = Arc::new(MockExecutor::new());
        let magick = Magick::new().with_executor(mock.clone());
        let mut list = two_frames(&magick);
        list[1].resize("75x75!").unwrap();
        list.save("out.tif").unwrap();

        assert_eq!(
            mock.get_calls(),
            vec![concat!(
                "convert \"(\" \"multipage.tif[0]\" \")\" ",
                "\"(\" \"multipage.tif[1]\" -resize \"75x75!\" \")\" out.tif"
            )]
        );
    }

    #[test]
    fn saving_an_empty_list_fails() {
        assert!(matches!(
            ImageList::new().save("out.tif"),
            Err(MagickError::InvalidParameter(_))
        ));
    }

    #[test]
    fn save_in_place_runs_mogrify_per_member() {
        let mock = Arc::new(MockExecutor::new());
        let magick = Magick::new().with_executor(mock.clone());
        let mut list = ImageList::new();
        list.append(vec![
            Image::new(&magick, "a.png", 0, None, false),
            Image::new(&magick, "b.jpg", 0, None, false),
        ]);
        list.set_format("gif").unwrap();
        list.save_in_place().unwrap();

        assert_eq!(
            mock.get_calls(),
            vec!["mogrify -format gif a.png", "mogrify -format gif b.jpg"]
        );
    }

    #[test]
    fn append_accepts_images_lists_and_vectors() {
        let magick = Magick::new();
        let mut list = ImageList::new();
        list.append(two_frames(&magick));
        list.append_any(Box::new(Image::new(&magick, "c.png", 0, None, false)))
            .unwrap();
        list.append_any(Box::new(vec![Image::new(&magick, "d.png", 0, None, false)]))
            .unwrap();
        list.append_any(Box::new(two_frames(&magick))).unwrap();
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn append_rejects_other_types() {
        let mut list = ImageList::new();
        assert!(matches!(
            list.append_any(Box::new(42)),
            Err(MagickError::InvalidAppendArgument(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn revert_is_refused_when_any_member_is_synthetic() {
        let magick = Magick::new();
        let mut list = two_frames(&magick);
        list[0].rotate(10.0).unwrap();
        list.append(magick.solid(5, 5, None).unwrap());

        assert!(matches!(
            list.revert(),
            Err(MagickError::CannotRevertSynthetic)
        ));
        assert_eq!(list[0].operators().len(), 1);
    }

    #[test]
    fn save_in_place_writes_each_file_once() {
        let mock = Arc::new(MockExecutor::with_stdout(&[
            "scan.tif[0] TIFF 100x100 100x100+0+0 8-bit sRGB 2c 1KB\nscan.tif[1] TIFF 80x80 80x80+0+0 8-bit sRGB 2c 1KB\n",
            "logo.png PNG 10x10 10x10+0+0 8-bit sRGB 2c 1KB\n",
        ]));
        let magick = Magick::new().with_executor(mock.clone());
        let mut list = ImageList::open(&magick, &["scan.tif", "logo.png"]).unwrap();
        list.resize("50%").unwrap();
        list[1].rotate(90.0).unwrap();
        list.save_in_place().unwrap();

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[2],
            concat!(
                "convert \"(\" \"scan.tif[0]\" -resize \"50%\" \")\" ",
                "\"(\" \"scan.tif[1]\" -resize \"50%\" -rotate 90 \")\" scan.tif"
            )
        );
        assert_eq!(calls[3], "mogrify -resize \"50%\" logo.png");
        assert!(list.iter().all(|image| image.operators().is_empty()));

        // a later edit to one frame leaves its sibling untouched
        list[1].rotate(90.0).unwrap();
        list[1].save_in_place().unwrap();
        assert_eq!(
            mock.get_calls()[4],
            "convert scan.tif \"(\" \"scan.tif[1]\" -rotate 90 \")\" -swap 1,-1 +delete scan.tif"
        );
    }

    #[test]
    fn save_in_place_splices_a_subset_of_frames() {
        let mock = Arc::new(MockExecutor::new());
        let magick = Magick::new().with_executor(mock.clone());
        let mut list = ImageList::new();
        list.append(vec![
            Image::new(&magick, "book.pdf", 2, None, false).with_frame_count(5),
            Image::new(&magick, "book.pdf", 4, None, false).with_frame_count(5),
        ]);
        list.strip().unwrap();
        list.save_in_place().unwrap();

        assert_eq!(
            mock.get_calls(),
            vec![concat!(
                "convert book.pdf ",
                "\"(\" \"book.pdf[2]\" -strip \")\" -swap 2,-1 +delete ",
                "\"(\" \"book.pdf[4]\" -strip \")\" -swap 4,-1 +delete book.pdf"
            )]
        );
    }
}
